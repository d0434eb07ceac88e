//! Message entity <-> model mappers

use parlor_core::entities::{AuthorActivity, AuthoredMessage};

use crate::models::{AuthorActivityModel, AuthoredMessageModel};

/// Convert the joined row to the AuthoredMessage read model
impl From<AuthoredMessageModel> for AuthoredMessage {
    fn from(model: AuthoredMessageModel) -> Self {
        AuthoredMessage {
            id: model.id,
            user_id: model.user_id,
            username: model.username,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Convert the aggregate row to the AuthorActivity read model
impl From<AuthorActivityModel> for AuthorActivity {
    fn from(model: AuthorActivityModel) -> Self {
        AuthorActivity {
            user_id: model.user_id,
            username: model.username,
            message_count: model.message_count,
        }
    }
}
