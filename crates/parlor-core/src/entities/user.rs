//! User entity - represents a registered account

use chrono::{DateTime, Utc};

/// User entity backing authentication, chat authorship, and admin roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    /// Unread watermark: messages newer than this count toward the badge.
    pub last_read_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this account holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// The effective unread watermark.
    ///
    /// Accounts that have never opened the chat fall back to their creation
    /// time, so a fresh user is not shown the entire room history as unread.
    pub fn read_watermark(&self) -> DateTime<Utc> {
        self.last_read_at.unwrap_or(self.created_at)
    }
}

/// Fields required to insert a new user; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a regular (non-admin) account draft with the current timestamp
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// Create an admin account draft with the current timestamp
    pub fn admin(username: String, password_hash: String) -> Self {
        Self {
            is_admin: true,
            ..Self::new(username, password_hash)
        }
    }
}
