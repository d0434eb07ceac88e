//! Response DTOs for API endpoints and page templates
//!
//! All response DTOs implement `Serialize`, both for JSON endpoints and for
//! minijinja template contexts.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Chat Responses
// ============================================================================

/// A chat message as delivered to clients
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub username: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgement for a stored message
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: String,
}

impl SendResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Unread-message count for the notification badge
#[derive(Debug, Serialize)]
pub struct UnreadResponse {
    pub count: i64,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// One row of the top-authors table
#[derive(Debug, Clone, Serialize)]
pub struct TopAuthorResponse {
    pub username: String,
    pub message_count: i64,
}

/// One bar of the hourly histogram (hour of day, 0..=23)
#[derive(Debug, Clone, Serialize)]
pub struct HourlyBucketResponse {
    pub hour: u32,
    pub count: i64,
}

/// Aggregates for the admin dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub user_count: i64,
    pub message_count: i64,
    pub messages_last_24h: i64,
    pub top_authors: Vec<TopAuthorResponse>,
    pub hourly: Vec<HourlyBucketResponse>,
    /// Largest hourly bucket, floored at 1 so templates can scale bars
    pub hourly_max: i64,
}

/// One row of the admin user table (also the profile page context)
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Point-in-time system resource usage for the monitor page
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub cpu_percent: f32,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_percent: f64,
    pub disk_used_bytes: u64,
    pub disk_total_bytes: u64,
    pub disk_percent: f64,
    /// Size of the SQLite file; 0 when the database is in-memory
    pub database_size_bytes: u64,
    pub process_count: usize,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Reported when the database probe fails
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
