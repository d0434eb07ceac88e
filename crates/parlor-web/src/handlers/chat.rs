//! Chat API handlers
//!
//! The fetch endpoints behind the chat page.

use axum::{
    extract::{Query, State},
    Json,
};
use parlor_service::dto::{MessageResponse, PollQuery, SendMessageRequest, SendResponse, UnreadResponse};
use parlor_service::ChatService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /send-message
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Json<SendResponse>> {
    let service = ChatService::new(state.service_context());
    service.send_message(&user, request).await?;
    Ok(Json(SendResponse::success()))
}

/// GET /poll-messages
///
/// Without `after`, returns the recent window. With `after`, returns only
/// messages strictly newer than the stamp, so idle polls come back empty.
pub async fn poll_messages(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<PollQuery>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = ChatService::new(state.service_context());
    let messages = service.poll(query.after).await?;
    Ok(Json(messages))
}

/// GET /check-new-messages
pub async fn check_new_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UnreadResponse>> {
    let service = ChatService::new(state.service_context());
    let count = service.unread_count(&user).await?;
    Ok(Json(UnreadResponse { count }))
}
