use axum::{
    Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::error::DeskError;
use crate::middleware::{Flash, RequireClient};
use crate::router::DeskState;
use crate::types::{DashboardAction, DashboardForm, QueueForm};
use crate::views;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub queue: Option<i64>,
}

/// Missing or foreign queues on owner pages send the client back to the
/// dashboard with a notice; anything else renders an error page.
fn back_to_dashboard(jar: PrivateCookieJar, state: &DeskState, err: DeskError) -> Response {
    match err {
        DeskError::QueueNotFound | DeskError::Forbidden | DeskError::AttendeeNotFound => {
            let jar = Flash::danger(err.to_string()).push(jar, state.cookies());
            (jar, Redirect::to("/dashboard")).into_response()
        }
        other => other.into_response(),
    }
}

/// GET /dashboard[?queue=<id>] -> the client's queues, optionally with one
/// queue's waiting list.
pub async fn dashboard(
    State(state): State<DeskState>,
    RequireClient(session): RequireClient,
    Query(query): Query<DashboardQuery>,
    jar: PrivateCookieJar,
) -> Response {
    let queues = match state.registry.list_queues(session.client_id).await {
        Ok(q) => q,
        Err(err) => return err.into_page(Some(&session.business_name)),
    };

    let selected = match query.queue {
        Some(queue_id) => {
            let loaded = async {
                let queue = state.registry.get_owned(session.client_id, queue_id).await?;
                let attendees = state.ledger.list_attendees(queue_id).await?;
                Ok::<_, DeskError>((queue, attendees))
            }
            .await;
            match loaded {
                Ok(pair) => Some(pair),
                Err(err) => return back_to_dashboard(jar, &state, err),
            }
        }
        None => None,
    };

    let (jar, flash) = Flash::take(jar);
    let page = views::dashboard_page(
        &session,
        &queues,
        selected.as_ref().map(|(q, a)| (q, a.as_slice())),
        flash.as_ref(),
    );
    (jar, Html(page)).into_response()
}

/// POST /dashboard -> delete a queue or mark an attendee served.
pub async fn dashboard_action(
    State(state): State<DeskState>,
    RequireClient(session): RequireClient,
    jar: PrivateCookieJar,
    Form(form): Form<DashboardForm>,
) -> Response {
    let owner = session.client_id;
    let outcome = match (form.action, form.attendee_id) {
        (DashboardAction::DeleteQueue, _) => state
            .registry
            .delete_queue(owner, form.queue_id)
            .await
            .map(|()| ("Queue deleted".to_string(), "/dashboard".to_string())),
        (DashboardAction::ServeAttendee, Some(attendee_id)) => state
            .ledger
            .serve(owner, form.queue_id, attendee_id)
            .await
            .map(|()| {
                (
                    "Attendee marked as served".to_string(),
                    format!("/dashboard?queue={}", form.queue_id),
                )
            }),
        (DashboardAction::ServeAttendee, None) => {
            Err(DeskError::Validation("Missing attendee".to_string()))
        }
    };

    match outcome {
        Ok((message, target)) => {
            let jar = Flash::success(message).push(jar, state.cookies());
            (jar, Redirect::to(&target)).into_response()
        }
        Err(DeskError::Validation(msg)) => {
            let jar = Flash::danger(msg).push(jar, state.cookies());
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(err) => back_to_dashboard(jar, &state, err),
    }
}

/// GET /add_queue
pub async fn add_queue_page(_client: RequireClient, jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = Flash::take(jar);
    (
        jar,
        Html(views::add_queue_page(&QueueForm::default(), None, flash.as_ref())),
    )
}

/// POST /add_queue -> create the queue and its QR artifact.
pub async fn add_queue_submit(
    State(state): State<DeskState>,
    RequireClient(session): RequireClient,
    jar: PrivateCookieJar,
    Form(form): Form<QueueForm>,
) -> Response {
    match state.registry.create_queue(session.client_id, form.clone()).await {
        Ok(queue_id) => {
            let jar = Flash::success("Queue created").push(jar, state.cookies());
            (jar, Redirect::to(&format!("/join_details/{queue_id}"))).into_response()
        }
        Err(DeskError::Validation(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::add_queue_page(&form, Some(&msg), None)),
        )
            .into_response(),
        Err(err) => err.into_page(Some(&session.business_name)),
    }
}

/// GET /join_details/{queue_id} -> join link and QR code for the owner.
pub async fn join_details(
    State(state): State<DeskState>,
    RequireClient(session): RequireClient,
    Path(queue_id): Path<i64>,
    jar: PrivateCookieJar,
) -> Response {
    let loaded = async {
        let queue = state.registry.get_owned(session.client_id, queue_id).await?;
        let link = state.registry.join_link(queue_id)?;
        Ok::<_, DeskError>((queue, link))
    }
    .await;
    let (queue, link) = match loaded {
        Ok(v) => v,
        Err(err) => return back_to_dashboard(jar, &state, err),
    };

    let (jar, flash) = Flash::take(jar);
    (
        jar,
        Html(views::join_details_page(&queue, link.as_str(), flash.as_ref())),
    )
        .into_response()
}

/// GET /artifacts/{queue_id}/qr.svg -> the stored QR image.
pub async fn join_artifact(
    State(state): State<DeskState>,
    RequireClient(session): RequireClient,
    Path(queue_id): Path<i64>,
) -> Result<Response, DeskError> {
    state.registry.get_owned(session.client_id, queue_id).await?;
    let svg = state
        .registry
        .artifacts()
        .read(queue_id)
        .await?
        .ok_or(DeskError::QueueNotFound)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
