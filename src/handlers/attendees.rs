use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::DbQueue;
use crate::error::DeskError;
use crate::middleware::{attendee_ticket, remember_attendee};
use crate::router::DeskState;
use crate::service::Position;
use crate::types::JoinForm;
use crate::views;

/// Load a queue for a public page together with its owner's business name.
async fn public_queue(state: &DeskState, queue_id: i64) -> Result<(DbQueue, String), DeskError> {
    let queue = state.registry.get_public(queue_id).await?;
    let business = state
        .accounts
        .business_name(queue.client_id)
        .await?
        .unwrap_or_default();
    Ok((queue, business))
}

fn status_path(queue_id: i64, attendee_id: i64) -> String {
    format!("/queue_status/{queue_id}/{attendee_id}")
}

/// GET /join_queue/{queue_id} -> join form. A browser that already holds a
/// live ticket for this queue goes straight to its status page.
pub async fn join_page(
    State(state): State<DeskState>,
    Path(queue_id): Path<i64>,
    jar: PrivateCookieJar,
) -> Response {
    let (queue, business) = match public_queue(&state, queue_id).await {
        Ok(v) => v,
        Err(err) => return err.into_page(None),
    };

    if let Some(attendee_id) = attendee_ticket(&jar, queue_id) {
        match state.ledger.position_of(queue_id, attendee_id).await {
            Ok(Position::Waiting(_)) => {
                return Redirect::to(&status_path(queue_id, attendee_id)).into_response();
            }
            Ok(Position::NotInQueue) => {}
            Err(err) => return err.into_page(Some(&business)),
        }
    }

    Html(views::join_page(&queue, &business, &JoinForm::default(), None)).into_response()
}

/// POST /join_queue/{queue_id} -> append to the ledger and hand out a ticket.
pub async fn join_submit(
    State(state): State<DeskState>,
    Path(queue_id): Path<i64>,
    jar: PrivateCookieJar,
    Form(form): Form<JoinForm>,
) -> Response {
    let (queue, business) = match public_queue(&state, queue_id).await {
        Ok(v) => v,
        Err(err) => return err.into_page(None),
    };

    match state.ledger.join(queue_id, form.clone()).await {
        Ok(ticket) => {
            let jar = remember_attendee(jar, queue_id, ticket.attendee_id, state.cookies());
            (jar, Redirect::to(&status_path(queue_id, ticket.attendee_id))).into_response()
        }
        Err(DeskError::Validation(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::join_page(&queue, &business, &form, Some(&msg))),
        )
            .into_response(),
        Err(err) => err.into_page(Some(&business)),
    }
}

/// GET /queue_status/{queue_id}/{attendee_id} -> position page, refreshed by
/// the browser.
pub async fn queue_status(
    State(state): State<DeskState>,
    Path((queue_id, attendee_id)): Path<(i64, i64)>,
) -> Response {
    let (queue, business) = match public_queue(&state, queue_id).await {
        Ok(v) => v,
        Err(err) => return err.into_page(None),
    };
    match state.ledger.position_of(queue_id, attendee_id).await {
        Ok(position) => Html(views::status_page(&queue, &business, position)).into_response(),
        Err(err) => err.into_page(Some(&business)),
    }
}

#[derive(Debug, Serialize)]
pub struct QueueStatus {
    pub queue_id: i64,
    pub attendee_id: i64,
    #[serde(flatten)]
    pub position: Position,
}

/// GET /api/queue_status/{queue_id}/{attendee_id} -> position as JSON.
pub async fn queue_status_json(
    State(state): State<DeskState>,
    Path((queue_id, attendee_id)): Path<(i64, i64)>,
) -> Response {
    let lookup = async {
        state.registry.get_public(queue_id).await?;
        state.ledger.position_of(queue_id, attendee_id).await
    }
    .await;
    match lookup {
        Ok(position) => Json(QueueStatus {
            queue_id,
            attendee_id,
            position,
        })
        .into_response(),
        Err(err) => err.into_json(),
    }
}
