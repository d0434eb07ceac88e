//! Chat service
//!
//! Message submission, page history, the delta poll, and the per-user unread
//! counter behind the notification badge.

use chrono::{DateTime, Utc};
use parlor_core::entities::{NewMessage, User};
use parlor_core::traits::MessageQuery;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Messages rendered on the chat page and returned by a cursor-less poll
pub const HISTORY_LIMIT: i64 = 50;

/// Upper bound on one delta poll response
pub const POLL_DELTA_LIMIT: i64 = 200;

/// Longest accepted message, in bytes
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a new message authored by `user`
    ///
    /// Content is trimmed; whitespace-only submissions are rejected.
    #[instrument(skip(self, request), fields(user_id = user.id))]
    pub async fn send_message(
        &self,
        user: &User,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let content = request.message.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Message cannot be empty"));
        }
        if content.len() > MAX_MESSAGE_LENGTH {
            return Err(ServiceError::validation("Message too long"));
        }

        let message = self
            .ctx
            .message_repo()
            .create(&NewMessage::new(user.id, content.to_string()))
            .await?;

        info!(message_id = message.id, "message stored");
        Ok(MessageResponse {
            username: user.username.clone(),
            content: message.content,
            timestamp: message.created_at,
        })
    }

    /// Most recent messages, oldest first, for the chat page render
    ///
    /// Also advances the caller's read watermark, so the notification badge
    /// resets once the page has been seen.
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn history(&self, user: &User) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().find_recent(HISTORY_LIMIT).await?;
        self.mark_read(user).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Poll for messages, oldest first
    ///
    /// With a cursor: only messages strictly newer than `after`, capped at
    /// [`POLL_DELTA_LIMIT`]. Without one: the same window the page renders.
    #[instrument(skip(self))]
    pub async fn poll(&self, after: Option<DateTime<Utc>>) -> ServiceResult<Vec<MessageResponse>> {
        let query = MessageQuery {
            after,
            limit: if after.is_some() {
                POLL_DELTA_LIMIT
            } else {
                HISTORY_LIMIT
            },
        };
        let messages = self.ctx.message_repo().find_since(&query).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Messages from other users newer than the caller's read watermark
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn unread_count(&self, user: &User) -> ServiceResult<i64> {
        self.ctx
            .message_repo()
            .count_unread(user.read_watermark(), user.id)
            .await
            .map_err(ServiceError::from)
    }

    /// Advance the caller's read watermark to now
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn mark_read(&self, user: &User) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .touch_last_read(user.id, Utc::now())
            .await
            .map_err(ServiceError::from)
    }
}
