//! Integration test utilities for the Parlor server
//!
//! This crate provides helpers for running end-to-end tests against the
//! web surface: each test boots the full application on its own port with
//! a throwaway SQLite file, then drives it over real HTTP.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
