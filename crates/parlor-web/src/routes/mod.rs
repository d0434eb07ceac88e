//! Route definitions
//!
//! Pages and JSON endpoints organized by surface.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, chat, health, pages};
use crate::state::AppState;

/// Create the router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(chat_routes())
        .merge(admin_routes())
        .route("/health", get(health::health_check))
}

/// Rendered pages and their form posts
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/register", get(pages::register_page).post(pages::register_submit))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", post(pages::logout))
        .route("/chat", get(pages::chat_page))
        .route("/profile", get(pages::profile_page))
        .route("/change-password", post(pages::change_password))
}

/// JSON endpoints the chat page polls
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/send-message", post(chat::send_message))
        .route("/poll-messages", get(chat::poll_messages))
        .route("/check-new-messages", get(chat::check_new_messages))
}

/// Admin surface
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/users", get(admin::users_page))
        .route("/admin/users/:user_id/toggle-admin", post(admin::toggle_admin))
        .route("/admin/users/:user_id/reset-password", post(admin::reset_password))
        .route("/admin/monitor", get(admin::monitor_page))
        .route("/admin/error-report", post(admin::error_report))
}
