//! Auth HTTP handlers: register, login, current user.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password;
use crate::error::{AppError, AuthFailure};
use crate::handlers::http::AppState;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 30))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state.users().find_by_email(&body.email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    let plaintext = body.password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))??;

    let user = state
        .users()
        .create(&body.name, &body.email, &password_hash)
        .await?;
    let token = state.tokens().issue(user.id)?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/users/login
///
/// Unknown email and wrong password are indistinguishable to the caller;
/// both collapse to the same generic rejection.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state.users().find_by_email(&body.email).await?;

    // Verify against the dummy hash when the email is unknown so both
    // rejection causes cost the same Argon2 pass.
    let stored = user
        .as_ref()
        .map(|u| u.password_hash.clone())
        .unwrap_or_else(|| password::DUMMY_HASH.to_string());
    let plaintext = body.password;
    let matches = tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?;

    let user = match user {
        Some(u) if matches => u,
        _ => return Err(AuthFailure::InvalidCredentials.into()),
    };

    let token = state.tokens().issue(user.id)?;

    Ok(Json(TokenResponse { token }))
}

/// GET /api/users/current — the authenticated user's record, credential
/// excluded.
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = state
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or(AuthFailure::SubjectNotFound)?;

    Ok(Json(CurrentUserResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
        created_at: user.created_at.to_rfc3339(),
    }))
}
