//! Professional-network backend: the token-auth core and user API.
//!
//! Registration and login hash credentials (Argon2) and issue signed,
//! time-limited bearer tokens (HS256 JWT); protected routes verify the
//! token and resolve the caller's identity before running.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::http;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router (users, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/current", get(auth::current_user));

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/api/users", user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
