//! Database models - SQLx-compatible structs for SQLite tables

mod message;
mod user;

pub use message::{AuthorActivityModel, AuthoredMessageModel};
pub use user::UserModel;
