//! Domain entities

pub mod message;
pub mod stats;
pub mod user;

pub use message::{AuthoredMessage, Message, NewMessage};
pub use stats::{AuthorActivity, HourlyCount};
pub use user::{NewUser, User};
