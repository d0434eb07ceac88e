//! Aggregate read models for the admin dashboard

/// Message volume attributed to one author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorActivity {
    pub user_id: i64,
    pub username: String,
    pub message_count: i64,
}

/// Message count for one hour-of-day bucket (0..=23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: i64,
}

impl HourlyCount {
    pub fn new(hour: u32, count: i64) -> Self {
        Self { hour, count }
    }
}
