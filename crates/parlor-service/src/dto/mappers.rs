//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use parlor_core::entities::{AuthorActivity, AuthoredMessage, HourlyCount, User};

use super::responses::{HourlyBucketResponse, MessageResponse, TopAuthorResponse, UserRow};

impl From<&AuthoredMessage> for MessageResponse {
    fn from(message: &AuthoredMessage) -> Self {
        Self {
            username: message.username.clone(),
            content: message.content.clone(),
            timestamp: message.created_at,
        }
    }
}

impl From<AuthoredMessage> for MessageResponse {
    fn from(message: AuthoredMessage) -> Self {
        Self {
            username: message.username,
            content: message.content,
            timestamp: message.created_at,
        }
    }
}

impl From<&AuthorActivity> for TopAuthorResponse {
    fn from(activity: &AuthorActivity) -> Self {
        Self {
            username: activity.username.clone(),
            message_count: activity.message_count,
        }
    }
}

impl From<AuthorActivity> for TopAuthorResponse {
    fn from(activity: AuthorActivity) -> Self {
        Self {
            username: activity.username,
            message_count: activity.message_count,
        }
    }
}

impl From<HourlyCount> for HourlyBucketResponse {
    fn from(bucket: HourlyCount) -> Self {
        Self {
            hour: bucket.hour,
            count: bucket.count,
        }
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
