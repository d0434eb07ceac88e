//! SQLite implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use parlor_core::entities::{AuthorActivity, AuthoredMessage, Message, NewMessage};
use parlor_core::traits::{MessageQuery, MessageRepository, RepoResult};

use crate::models::{AuthorActivityModel, AuthoredMessageModel};

use super::error::map_db_error;

/// Hard cap on rows returned by a single poll
const MAX_POLL_LIMIT: i64 = 200;

/// SQLite implementation of MessageRepository
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Create a new SqliteMessageRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    #[instrument(skip(self, message))]
    async fn create(&self, message: &NewMessage) -> RepoResult<Message> {
        let result = sqlx::query(
            r"
            INSERT INTO messages (user_id, content, created_at)
            VALUES (?, ?, ?)
            ",
        )
        .bind(message.user_id)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message {
            id: result.last_insert_rowid(),
            user_id: message.user_id,
            content: message.content.clone(),
            created_at: message.created_at,
        })
    }

    #[instrument(skip(self))]
    async fn find_recent(&self, limit: i64) -> RepoResult<Vec<AuthoredMessage>> {
        let limit = limit.clamp(1, MAX_POLL_LIMIT);

        // Newest window first, then flipped so callers get oldest-first
        let mut results = sqlx::query_as::<_, AuthoredMessageModel>(
            r"
            SELECT m.id, m.user_id, u.username, m.content, m.created_at
            FROM messages m
            JOIN users u ON u.id = m.user_id
            ORDER BY m.id DESC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.reverse();
        Ok(results.into_iter().map(AuthoredMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_since(&self, query: &MessageQuery) -> RepoResult<Vec<AuthoredMessage>> {
        let limit = query.limit.clamp(1, MAX_POLL_LIMIT);

        let Some(after) = query.after else {
            return self.find_recent(limit).await;
        };

        let results = sqlx::query_as::<_, AuthoredMessageModel>(
            r"
            SELECT m.id, m.user_id, u.username, m.content, m.created_at
            FROM messages m
            JOIN users u ON u.id = m.user_id
            WHERE m.created_at > ?
            ORDER BY m.created_at ASC, m.id ASC
            LIMIT ?
            ",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AuthoredMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE created_at > ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, since: DateTime<Utc>, excluding_user: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM messages
            WHERE created_at > ? AND user_id != ?
            ",
        )
        .bind(since)
        .bind(excluding_user)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn top_authors(&self, limit: i64) -> RepoResult<Vec<AuthorActivity>> {
        let results = sqlx::query_as::<_, AuthorActivityModel>(
            r"
            SELECT u.id AS user_id, u.username AS username, COUNT(m.id) AS message_count
            FROM messages m
            JOIN users u ON u.id = m.user_id
            GROUP BY u.id, u.username
            ORDER BY message_count DESC, u.username ASC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AuthorActivity::from).collect())
    }

    #[instrument(skip(self))]
    async fn created_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            r"
            SELECT created_at
            FROM messages
            WHERE created_at > ?
            ORDER BY created_at ASC
            ",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
