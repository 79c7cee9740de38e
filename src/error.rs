use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{db::BackendError, models::sale::SALE_CAP_MESSAGE};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Backend(BackendError),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

/// How a recognized backend message is reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rejected,
    Missing,
}

/// Backend routines only report rule violations as message text. Each entry maps a
/// substring of that text to the outcome the client sees.
const BACKEND_MESSAGE_RULES: &[(&str, Outcome)] = &[
    ("Product not found", Outcome::Missing),
    ("No sales", Outcome::Missing),
    ("You cannot modify orders at Saturday or Sunday", Outcome::Rejected),
    (SALE_CAP_MESSAGE, Outcome::Rejected),
];

/// First rule whose substring occurs in `message`
pub fn classify_backend_message(message: &str) -> Option<Outcome> {
    BACKEND_MESSAGE_RULES
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map(|(_, outcome)| *outcome)
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        match classify_backend_message(&message) {
            Some(Outcome::Missing) => AppError::NotFound(message),
            Some(Outcome::Rejected) => AppError::BadRequest(message),
            None => AppError::Backend(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert AppError to an HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(?self);
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

pub type Result<T> = std::result::Result<T, AppError>;
