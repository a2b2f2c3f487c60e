//! Auth extractor: verifies the bearer token and attaches the caller's
//! identity to the request.

use axum::http::header::AUTHORIZATION;
use uuid::Uuid;

use crate::error::{AppError, AuthFailure};
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller of the current request.
///
/// Produced only when the bearer token's signature and expiry check out and
/// the subject still exists in the user store; lives for the request only.
/// A handler that takes this as an argument is a protected route: any
/// failure rejects the request before the handler body runs, with the same
/// generic 401 regardless of cause.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthFailure::MissingToken)?;

        let user_id = state.tokens().verify(token)?;

        // The token may outlive its subject (deleted account); confirm the
        // record still exists before trusting the claim.
        state
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AuthFailure::SubjectNotFound)?;

        Ok(AuthUser(user_id))
    }
}
