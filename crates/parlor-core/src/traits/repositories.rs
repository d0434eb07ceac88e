//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{AuthorActivity, AuthoredMessage, Message, NewMessage, NewUser, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Set or clear the admin flag
    async fn set_admin(&self, id: i64, is_admin: bool) -> RepoResult<()>;

    /// Record a successful login
    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;

    /// Advance the unread watermark
    async fn touch_last_read(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;

    /// List every user, oldest account first
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    /// Total number of accounts
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Cursor for delta message polls
#[derive(Debug, Clone)]
pub struct MessageQuery {
    /// Only return messages strictly newer than this timestamp
    pub after: Option<DateTime<Utc>>,
    /// Maximum number of messages to return
    pub limit: i64,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            after: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message and return it with its assigned id
    async fn create(&self, message: &NewMessage) -> RepoResult<Message>;

    /// The newest `limit` messages, returned oldest first
    async fn find_recent(&self, limit: i64) -> RepoResult<Vec<AuthoredMessage>>;

    /// Messages matching the cursor, returned oldest first
    async fn find_since(&self, query: &MessageQuery) -> RepoResult<Vec<AuthoredMessage>>;

    /// Total number of messages
    async fn count(&self) -> RepoResult<i64>;

    /// Messages created strictly after `since`
    async fn count_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;

    /// Messages created strictly after `since` whose author is not `excluding_user`
    async fn count_unread(&self, since: DateTime<Utc>, excluding_user: i64) -> RepoResult<i64>;

    /// The most prolific authors, busiest first
    async fn top_authors(&self, limit: i64) -> RepoResult<Vec<AuthorActivity>>;

    /// Creation timestamps of messages newer than `since`, for histogram bucketing
    async fn created_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<DateTime<Utc>>>;
}
