use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::views;

#[derive(Debug, ThisError)]
pub enum DeskError {
    #[error("{0}")]
    Validation(String),

    #[error("Client with this Login details does not exist")]
    UnknownEmail,

    #[error("Invalid Login Credentials")]
    InvalidCredentials,

    #[error("You do not have access to this queue")]
    Forbidden,

    #[error("Queue not found")]
    QueueNotFound,

    #[error("Attendee not found in this queue")]
    AttendeeNotFound,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("QR code error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<argon2::password_hash::Error> for DeskError {
    fn from(e: argon2::password_hash::Error) -> Self {
        DeskError::Hash(e.to_string())
    }
}

impl DeskError {
    /// Faults on the server side, as opposed to bad input or missing rows.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DeskError::Hash(_)
                | DeskError::Qr(_)
                | DeskError::DatabaseError(_)
                | DeskError::Io(_)
                | DeskError::UrlParse(_)
                | DeskError::Config(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            DeskError::Validation(_) => StatusCode::BAD_REQUEST,
            DeskError::UnknownEmail | DeskError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DeskError::Forbidden => StatusCode::FORBIDDEN,
            DeskError::QueueNotFound | DeskError::AttendeeNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            DeskError::Validation(_) => "INVALID_INPUT",
            DeskError::UnknownEmail | DeskError::InvalidCredentials => "INVALID_CREDENTIALS",
            DeskError::Forbidden => "FORBIDDEN",
            DeskError::QueueNotFound => "QUEUE_NOT_FOUND",
            DeskError::AttendeeNotFound => "ATTENDEE_NOT_FOUND",
            _ => "INTERNAL_ERROR",
        }
    }

    /// User-facing text; internal faults never leak their details.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        }
    }

    /// Render as a full HTML page. `business` names the queue owner to
    /// contact when something breaks on a public page.
    pub fn into_page(self, business: Option<&str>) -> Response {
        if self.is_internal() {
            error!(error = %self, "request failed");
        }
        let status = self.status();
        let body = if self.is_internal() {
            views::support_page(business)
        } else {
            views::error_page(status, &self.public_message())
        };
        (status, Html(body)).into_response()
    }

    pub fn into_json(self) -> Response {
        if self.is_internal() {
            error!(error = %self, "request failed");
        }
        let status = self.status();
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message: self.public_message(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        self.into_page(None)
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
