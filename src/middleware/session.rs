use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;

use super::flash::Flash;
use crate::service::ClientSession;

const SESSION_COOKIE: &str = "queuedesk_session";
const TICKET_COOKIE_PREFIX: &str = "queuedesk_ticket_";

/// Attributes shared by every cookie the app sets.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    pub fn build(self, name: &str, value: String) -> Cookie<'static> {
        Cookie::build(Cookie::new(name.to_string(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    fn build_with_age(self, name: &str, value: String, max_age: Duration) -> Cookie<'static> {
        let mut cookie = self.build(name, value);
        cookie.set_max_age(max_age);
        cookie
    }
}

pub fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn sign_in(jar: PrivateCookieJar, session: &ClientSession, settings: CookieSettings) -> PrivateCookieJar {
    match serde_json::to_string(session) {
        Ok(value) => jar.add(settings.build_with_age(SESSION_COOKIE, value, Duration::days(1))),
        Err(_) => jar,
    }
}

pub fn sign_out(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(clear_cookie(SESSION_COOKIE))
}

pub fn current_client(jar: &PrivateCookieJar) -> Option<ClientSession> {
    let raw = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(raw.value()).ok()
}

fn ticket_cookie(queue_id: i64) -> String {
    format!("{TICKET_COOKIE_PREFIX}{queue_id}")
}

/// Remember which attendee this browser is in `queue_id`. One cookie per
/// queue, so joining a second queue does not clobber the first ticket.
pub fn remember_attendee(
    jar: PrivateCookieJar,
    queue_id: i64,
    attendee_id: i64,
    settings: CookieSettings,
) -> PrivateCookieJar {
    jar.add(settings.build_with_age(
        &ticket_cookie(queue_id),
        attendee_id.to_string(),
        Duration::hours(12),
    ))
}

pub fn attendee_ticket(jar: &PrivateCookieJar, queue_id: i64) -> Option<i64> {
    jar.get(&ticket_cookie(queue_id))?.value().parse().ok()
}

/// Extractor for pages that need a logged-in client. Anonymous requests are
/// redirected to `/login` with a notice.
#[derive(Debug, Clone)]
pub struct RequireClient(pub ClientSession);

impl<S> FromRequestParts<S> for RequireClient
where
    S: Send + Sync,
    Key: FromRef<S>,
    CookieSettings: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|never| match never {})?;
        if let Some(session) = current_client(&jar) {
            return Ok(Self(session));
        }

        let settings = CookieSettings::from_ref(state);
        let jar = Flash::info("Unauthorized, please login").push(jar, settings);
        Err((jar, Redirect::to("/login")).into_response())
    }
}
