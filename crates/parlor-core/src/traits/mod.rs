pub mod repositories;

pub use repositories::{MessageQuery, MessageRepository, RepoResult, UserRepository};
