//! HTTP plumbing shared across routes.

pub mod http;

pub use http::AppState;
