//! Message entity - a single chat room post
//!
//! Messages are append-only: created on send, never edited or deleted.

use chrono::{DateTime, Utc};

/// Chat message as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a message; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    /// Create a message draft with a server-assigned timestamp
    pub fn new(user_id: i64, content: String) -> Self {
        Self {
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Read model joining a message with its author's username.
///
/// The chat history and poll endpoints always render the author name, so the
/// store resolves it in one query instead of a lookup per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredMessage {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
