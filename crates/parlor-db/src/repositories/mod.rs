//! Repository implementations for SQLite

mod error;
mod message;
mod user;

pub use message::SqliteMessageRepository;
pub use user::SqliteUserRepository;
