//! Request middleware: bearer-token auth extractor.

pub mod auth;

pub use auth::AuthUser;
