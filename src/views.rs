//! HTML pages, rendered with plain `format!` templates.
//!
//! Every user-supplied value goes through [`html_escape`] before it lands in
//! markup.

use axum::http::StatusCode;

use crate::db::{DbAttendee, DbQueue, QueueSummary};
use crate::middleware::{Flash, FlashLevel};
use crate::service::{ClientSession, Position};
use crate::types::{JoinForm, QueueForm, RegistrationForm};

/// Seconds between automatic refreshes of the attendee status page.
pub const STATUS_REFRESH_SECS: u32 = 15;

/// Base HTML layout wrapper.
pub fn layout(title: &str, signed_in: bool, flash: Option<&Flash>, content: &str) -> String {
    layout_with_head(title, signed_in, flash, "", content)
}

fn layout_with_head(
    title: &str,
    signed_in: bool,
    flash: Option<&Flash>,
    head: &str,
    content: &str,
) -> String {
    let nav_links = if signed_in {
        r#"<a href="/dashboard">Dashboard</a> <a href="/add_queue">New queue</a> <a href="/logout">Logout</a>"#
    } else {
        r#"<a href="/register">Register</a> <a href="/login">Login</a>"#
    };
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {head}
    <title>{title} - QueueDesk</title>
</head>
<body>
    <nav><a href="/">QueueDesk</a> <a href="/how-it-works">How it works</a> {nav_links}</nav>
    {flash}
    <main>
{content}
    </main>
</body>
</html>"##,
        title = html_escape(title),
        flash = flash_html(flash),
    )
}

fn flash_html(flash: Option<&Flash>) -> String {
    let Some(flash) = flash else {
        return String::new();
    };
    let class = match flash.level {
        FlashLevel::Success => "success",
        FlashLevel::Info => "info",
        FlashLevel::Danger => "danger",
    };
    format!(
        r#"<div class="alert alert-{class}">{}</div>"#,
        html_escape(&flash.message)
    )
}

fn error_html(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="alert alert-danger">{}</div>"#, html_escape(e)))
        .unwrap_or_default()
}

pub fn home_page(signed_in: bool, flash: Option<&Flash>) -> String {
    layout(
        "Home",
        signed_in,
        flash,
        r#"<h1>Skip the line, keep your place</h1>
<p>Create a queue for your business, print its QR code and let customers join from their phone.</p>
<p><a href="/register">Get started</a></p>"#,
    )
}

pub fn how_it_works_page(signed_in: bool) -> String {
    layout(
        "How it works",
        signed_in,
        None,
        r#"<h1>How it works</h1>
<ol>
    <li>Register your business and log in.</li>
    <li>Create a queue and share its join link or QR code.</li>
    <li>Customers join and watch their position update.</li>
    <li>Serve customers from your dashboard as they reach the counter.</li>
</ol>"#,
    )
}

pub fn register_page(form: &RegistrationForm, error: Option<&str>, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/register">
    <label>Business Name <input name="business_name" value="{business_name}" maxlength="100" required></label>
    <label>Email <input name="email" type="email" value="{email}" maxlength="100" required></label>
    <label>Phone Number <input name="phone_number" value="{phone_number}" maxlength="50" required></label>
    <label>Password <input name="password" type="password" required></label>
    <label>Confirm Password <input name="confirm" type="password" required></label>
    <button type="submit">Register</button>
</form>"#,
        error = error_html(error),
        business_name = html_escape(&form.business_name),
        email = html_escape(&form.email),
        phone_number = html_escape(&form.phone_number),
    );
    layout("Register", false, flash, &content)
}

pub fn login_page(email: &str, error: Option<&str>, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>Login</h1>
{error}
<form method="post" action="/login">
    <label>Email <input name="user_email" type="email" value="{email}" required></label>
    <label>Password <input name="user_password" type="password" required></label>
    <button type="submit">Login</button>
</form>"#,
        error = error_html(error),
        email = html_escape(email),
    );
    layout("Login", false, flash, &content)
}

pub fn dashboard_page(
    session: &ClientSession,
    queues: &[QueueSummary],
    selected: Option<(&DbQueue, &[DbAttendee])>,
    flash: Option<&Flash>,
) -> String {
    let queue_rows = if queues.is_empty() {
        r#"<p>No queues yet. <a href="/add_queue">Create your first queue</a>.</p>"#.to_string()
    } else {
        let rows: String = queues
            .iter()
            .map(|q| {
                format!(
                    r#"<tr><td><a href="/dashboard?queue={id}">{name}</a></td><td>{purpose}</td><td>{waiting}</td>
<td><a href="/join_details/{id}">Join link</a>
<form method="post" action="/dashboard"><input type="hidden" name="action" value="delete_queue"><input type="hidden" name="queue_id" value="{id}"><button type="submit">Delete</button></form></td></tr>"#,
                    id = q.queue.id,
                    name = html_escape(&q.queue.queue_name),
                    purpose = html_escape(&q.queue.purpose),
                    waiting = q.waiting,
                )
            })
            .collect();
        format!(
            "<table><tr><th>Queue</th><th>Purpose</th><th>Waiting</th><th></th></tr>{rows}</table>"
        )
    };

    let attendee_section = selected
        .map(|(queue, attendees)| attendee_table(queue, attendees))
        .unwrap_or_default();

    let content = format!(
        r#"<h1>{business}</h1>
<h2>Your queues</h2>
{queue_rows}
{attendee_section}"#,
        business = html_escape(&session.business_name),
    );
    layout("Dashboard", true, flash, &content)
}

fn attendee_table(queue: &DbQueue, attendees: &[DbAttendee]) -> String {
    let body = if attendees.is_empty() {
        "<p>Nobody is waiting.</p>".to_string()
    } else {
        let rows: String = attendees
            .iter()
            .enumerate()
            .map(|(i, a)| {
                format!(
                    r#"<tr><td>{pos}</td><td>{name}</td><td>{account}</td><td>{service}</td><td>{joined}</td>
<td><form method="post" action="/dashboard"><input type="hidden" name="action" value="serve_attendee"><input type="hidden" name="queue_id" value="{queue_id}"><input type="hidden" name="attendee_id" value="{id}"><button type="submit">Served</button></form></td></tr>"#,
                    pos = i + 1,
                    name = html_escape(&a.full_name()),
                    account = html_escape(&a.account_number),
                    service = html_escape(&a.service_requested),
                    joined = a.joined_at.format("%H:%M"),
                    queue_id = queue.id,
                    id = a.id,
                )
            })
            .collect();
        format!(
            "<table><tr><th>#</th><th>Name</th><th>Account</th><th>Service</th><th>Joined</th><th></th></tr>{rows}</table>"
        )
    };
    format!(
        "<h2>{name}</h2>\n{body}",
        name = html_escape(&queue.queue_name)
    )
}

pub fn add_queue_page(form: &QueueForm, error: Option<&str>, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>New queue</h1>
{error}
<form method="post" action="/add_queue">
    <label>Queue Name <input name="queue_name" value="{queue_name}" maxlength="100" required></label>
    <label>Purpose <input name="purpose" value="{purpose}" maxlength="255"></label>
    <label>Instructions <textarea name="instructions" maxlength="1000">{instructions}</textarea></label>
    <button type="submit">Create queue</button>
</form>"#,
        error = error_html(error),
        queue_name = html_escape(&form.queue_name),
        purpose = html_escape(&form.purpose),
        instructions = html_escape(&form.instructions),
    );
    layout("New queue", true, flash, &content)
}

pub fn join_details_page(queue: &DbQueue, link: &str, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>{name}</h1>
<p>Share this link or print the QR code:</p>
<p><a href="{link}">{link}</a></p>
<img src="/artifacts/{id}/qr.svg" alt="QR code for {name}" width="200" height="200">"#,
        name = html_escape(&queue.queue_name),
        link = html_escape(link),
        id = queue.id,
    );
    layout("Join details", true, flash, &content)
}

pub fn join_page(queue: &DbQueue, business: &str, form: &JoinForm, error: Option<&str>) -> String {
    let content = format!(
        r#"<h1>{queue_name}</h1>
<p>{business}</p>
<p>{purpose}</p>
<p>{instructions}</p>
{error}
<form method="post" action="/join_queue/{id}">
    <label>First Name <input name="first_name" value="{first_name}" maxlength="100" required></label>
    <label>Last Name <input name="last_name" value="{last_name}" maxlength="100" required></label>
    <label>Account Number <input name="account_number" value="{account_number}" maxlength="50"></label>
    <label>Service Requested <input name="service_requested" value="{service_requested}" maxlength="255"></label>
    <button type="submit">Join queue</button>
</form>"#,
        queue_name = html_escape(&queue.queue_name),
        business = html_escape(business),
        purpose = html_escape(&queue.purpose),
        instructions = html_escape(&queue.instructions),
        error = error_html(error),
        id = queue.id,
        first_name = html_escape(&form.first_name),
        last_name = html_escape(&form.last_name),
        account_number = html_escape(&form.account_number),
        service_requested = html_escape(&form.service_requested),
    );
    layout("Join queue", false, None, &content)
}

pub fn status_page(queue: &DbQueue, business: &str, position: Position) -> String {
    let (head, body) = match position {
        Position::Waiting(1) => (
            refresh_meta(),
            "<p class=\"position\">You are next (position 1).</p>".to_string(),
        ),
        Position::Waiting(n) => (
            refresh_meta(),
            format!("<p class=\"position\">Your position in the queue: {n}</p>"),
        ),
        Position::NotInQueue => (
            String::new(),
            format!(
                r#"<p>You are no longer in this queue. You have been served, or the queue was closed.</p>
<p><a href="/join_queue/{}">Join again</a></p>"#,
                queue.id
            ),
        ),
    };
    let content = format!(
        "<h1>{queue_name}</h1>\n<p>{business}</p>\n{body}",
        queue_name = html_escape(&queue.queue_name),
        business = html_escape(business),
    );
    layout_with_head("Queue status", false, None, &head, &content)
}

fn refresh_meta() -> String {
    format!(r#"<meta http-equiv="refresh" content="{STATUS_REFRESH_SECS}">"#)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h1>{code}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to home</a></p>",
        code = status.as_u16(),
        message = html_escape(message),
    );
    layout("Error", false, None, &content)
}

/// Shown when something breaks on our side; points at the business to ask.
pub fn support_page(business: Option<&str>) -> String {
    let contact = match business {
        Some(name) => format!(
            "Please try again later or contact {} for assistance.",
            html_escape(name)
        ),
        None => "Please try again later or contact support.".to_string(),
    };
    let content = format!("<h1>Something went wrong</h1>\n<p>{contact}</p>");
    layout("Error", false, None, &content)
}

/// Simple HTML escape function
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
