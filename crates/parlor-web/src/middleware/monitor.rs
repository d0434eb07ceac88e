//! Category-log monitor middleware
//!
//! Watches every request and files noteworthy ones into the category
//! logs: injection probes and auth failures under Security, slow
//! requests under Performance, malformed input under Validation,
//! database failures under Database, and remaining errors under Http.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use parlor_common::LogCategory;
use percent_encoding::percent_decode_str;

use super::REQUEST_ID_HEADER;
use crate::response::ErrorCode;
use crate::state::AppState;

/// Fragments that mark a query string as a probable injection probe
const SUSPICIOUS_FRAGMENTS: &[&str] = &[
    "union select",
    "or 1=1",
    "drop table",
    "delete from",
    "insert into",
    "--",
    "/*",
    "' or '",
];

/// Error codes that belong in the validation log
const VALIDATION_CODES: &[&str] = &[
    "VALIDATION_ERROR",
    "INVALID_REQUEST_BODY",
    "WEAK_PASSWORD",
    "INVALID_USERNAME",
];

/// Inspect a request on the way in and classify its response on the
/// way out.
pub async fn monitor(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    if let Some(query) = request.uri().query() {
        scan_query(&state, &request_id, &method, &path, query);
    }

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis();
    let slow_after = state.config().logging.slow_request_ms;
    if elapsed_ms > u128::from(slow_after) {
        state.event_log().warn(
            LogCategory::Performance,
            &format!(
                "[{request_id}] Slow request: {method} {path} took {elapsed_ms}ms (threshold {slow_after}ms)"
            ),
        );
    }

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        log_failure(&state, &request_id, &method, &path, &response);
    }

    response
}

/// Look for injection fragments in the decoded query string
fn scan_query(state: &AppState, request_id: &str, method: &Method, path: &str, query: &str) {
    let decoded = percent_decode_str(query)
        .decode_utf8_lossy()
        .replace('+', " ")
        .to_lowercase();

    for fragment in SUSPICIOUS_FRAGMENTS {
        if decoded.contains(fragment) {
            state.event_log().warn(
                LogCategory::Security,
                &format!(
                    "[{request_id}] Suspicious query fragment {fragment:?} in {method} {path}"
                ),
            );
            break;
        }
    }
}

/// Route a failed response to the category log it belongs to
fn log_failure(
    state: &AppState,
    request_id: &str,
    method: &Method,
    path: &str,
    response: &Response,
) {
    let status = response.status();
    let line = format!("[{request_id}] {method} {path} responded {status}");

    // Handlers tag error responses with their code so failures can be
    // classified without re-parsing the body.
    if let Some(ErrorCode(code)) = response.extensions().get::<ErrorCode>() {
        if code == "DATABASE_ERROR" {
            state.event_log().error(LogCategory::Database, &line);
            return;
        }
        if VALIDATION_CODES.contains(&code.as_str()) {
            state.event_log().warn(LogCategory::Validation, &line);
            return;
        }
    }

    match status.as_u16() {
        401 | 403 => state.event_log().warn(LogCategory::Security, &line),
        415 | 422 => state.event_log().warn(LogCategory::Validation, &line),
        400..=499 => state.event_log().warn(LogCategory::Http, &line),
        _ => state.event_log().error(LogCategory::Http, &line),
    }
}
