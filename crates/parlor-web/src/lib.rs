//! # parlor-web
//!
//! HTTP server for the chat application: rendered pages, the JSON
//! message API, and the admin surface, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
