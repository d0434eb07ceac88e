//! Axum extractors for request handling
//!
//! Custom extractors for authentication and body validation.

mod auth;
mod validated;

pub use auth::{AdminUser, AuthUser, LoginRedirect, OptionalAuthUser, PageUser, SESSION_COOKIE};
pub use validated::ValidatedJson;
