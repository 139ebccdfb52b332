//! # beatit_core
//!
//! Core domain logic for BeatIt: authentication and session lifecycle,
//! user management, and the game backlog / completed-list services.

pub mod auth;
pub mod backlog;
pub mod cache;
pub mod completed;
pub mod error;
pub mod games;
pub mod igdb;
pub mod migrate;
pub mod models;
pub mod store;
pub mod users;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
