//! Application error types for robust error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Internal cause of an authentication rejection.
///
/// Every variant renders as the same generic 401 body; the distinction
/// exists only for server-side diagnostics, so the response never tells a
/// client which check failed.
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("no bearer token supplied")]
    MissingToken,

    #[error("token signature or format invalid")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("token subject no longer exists")]
    SubjectNotFound,

    #[error("credentials do not match")]
    InvalidCredentials,
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Db(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            AppError::Serialization(e) => {
                (StatusCode::BAD_REQUEST, format!("Invalid payload: {}", e))
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(cause) => {
                tracing::debug!(%cause, "request rejected at auth boundary");
                (
                    StatusCode::UNAUTHORIZED,
                    "Authentication failed".to_string(),
                )
            }
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", e),
            ),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
