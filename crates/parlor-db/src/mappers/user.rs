//! User entity <-> model mapper

use parlor_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
            last_read_at: model.last_read_at,
        }
    }
}
