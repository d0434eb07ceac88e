//! Message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Message row joined with its author's username
#[derive(Debug, Clone, FromRow)]
pub struct AuthoredMessageModel {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate row for the top-authors dashboard query
#[derive(Debug, Clone, FromRow)]
pub struct AuthorActivityModel {
    pub user_id: i64,
    pub username: String,
    pub message_count: i64,
}
