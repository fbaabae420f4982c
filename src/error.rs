// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

pub const INVALID_QUESTION: &str = "Invalid question format";
pub const SERVICE_UNAVAILABLE: &str = "AI service unavailable. Please try again later.";

/// Errors surfaced at the HTTP boundary. Every variant renders a fixed message;
/// the detail carried by `Internal` only goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid question: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => INVALID_QUESTION,
            Self::Internal(_) => SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(reason) => tracing::debug!(%reason, "rejected chat request"),
            Self::Internal(reason) => tracing::error!(%reason, "chat request failed"),
        }

        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status(), body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
