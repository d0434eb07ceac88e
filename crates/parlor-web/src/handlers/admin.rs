//! Admin handlers
//!
//! Dashboard, user management, the system monitor, and the error
//! report. Every route extracts [`AdminUser`], so a signed-in
//! non-admin stops at the door with a 403.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use minijinja::context;
use parlor_service::dto::{ResetPasswordForm, UserRow};
use parlor_service::{AdminService, MonitorService, ReportService, REFRESH_SECONDS};

use super::{flash_message, FlashParams};
use crate::extractors::AdminUser;
use crate::response::{redirect_with_error, redirect_with_notice, ApiError};
use crate::state::AppState;
use crate::templates::render;

/// GET /admin
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Html<String>, ApiError> {
    let service = AdminService::new(state.service_context());
    let stats = service.dashboard(&user).await?;

    render(
        state.templates(),
        "admin/dashboard.html",
        context! {
            current_user => UserRow::from(&user),
            stats => stats,
        },
    )
}

/// GET /admin/users
pub async fn users_page(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let service = AdminService::new(state.service_context());
    let users = service.list_users(&user).await?;

    render(
        state.templates(),
        "admin/users.html",
        context! {
            current_user => UserRow::from(&user),
            users => users,
            notice => flash.notice,
            error => flash.error,
        },
    )
}

/// POST /admin/users/:user_id/toggle-admin
pub async fn toggle_admin(
    State(state): State<AppState>,
    AdminUser(actor): AdminUser,
    Path(user_id): Path<i64>,
) -> Redirect {
    let service = AdminService::new(state.service_context());

    match service.toggle_admin(&actor, user_id).await {
        Ok(target) => {
            let role = if target.is_admin { "admin" } else { "member" };
            redirect_with_notice(
                "/admin/users",
                &format!("{} is now a {role}", target.username),
            )
        }
        Err(e) => redirect_with_error("/admin/users", &flash_message(&e)),
    }
}

/// POST /admin/users/:user_id/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AdminUser(actor): AdminUser,
    Path(user_id): Path<i64>,
    Form(form): Form<ResetPasswordForm>,
) -> Redirect {
    let service = AdminService::new(state.service_context());

    match service.reset_password(&actor, user_id, &form.password).await {
        Ok(()) => redirect_with_notice("/admin/users", "Password reset"),
        Err(e) => redirect_with_error("/admin/users", &flash_message(&e)),
    }
}

/// GET /admin/monitor
pub async fn monitor_page(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Html<String>, ApiError> {
    let service = MonitorService::new(state.service_context());
    let status = service.snapshot(&user).await?;

    render(
        state.templates(),
        "admin/monitor.html",
        context! {
            current_user => UserRow::from(&user),
            status => status,
            refresh_seconds => REFRESH_SECONDS,
        },
    )
}

/// POST /admin/error-report
pub async fn error_report(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Html<String>, ApiError> {
    let service = ReportService::new(state.service_context());
    let report = service.generate(&user).await?;

    render(
        state.templates(),
        "admin/report.html",
        context! {
            current_user => UserRow::from(&user),
            path => report.path.display().to_string(),
            body => report.body,
        },
    )
}
