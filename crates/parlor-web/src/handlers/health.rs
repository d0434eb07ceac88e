//! Health check handler

use axum::{extract::State, http::StatusCode, Json};
use parlor_service::dto::HealthResponse;

use crate::state::AppState;

/// GET /health
///
/// Answers degraded with a 503 when the pool cannot hand out a
/// database connection.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = state.service_context().pool().acquire().await.is_ok();

    if db_healthy {
        (StatusCode::OK, Json(HealthResponse::ok()))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::degraded()),
        )
    }
}
