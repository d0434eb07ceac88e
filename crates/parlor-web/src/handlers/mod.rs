//! Route handlers
//!
//! Page handlers render templates, chat handlers speak JSON for the
//! fetch calls on the chat page, admin handlers do both.

use parlor_common::AppError;
use parlor_service::ServiceError;
use serde::Deserialize;

pub mod admin;
pub mod chat;
pub mod health;
pub mod pages;

/// Notice and error strings a redirect can carry back to a page
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// User-facing message for a failed form post
///
/// Strips the layer prefixes the error Display forms carry, since the
/// text lands in a flash box rather than a log.
pub(crate) fn flash_message(error: &ServiceError) -> String {
    match error {
        ServiceError::App(AppError::InvalidCredentials) => {
            "Current password is incorrect".to_string()
        }
        ServiceError::Validation(msg) | ServiceError::Conflict(msg) => msg.clone(),
        ServiceError::Domain(e) => e.to_string(),
        other => other.to_string(),
    }
}
