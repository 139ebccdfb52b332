//! Session cache abstraction.
//!
//! Key/value store with per-entry expiration, used for refresh-token state
//! and short-lived secrets (password-reset tokens, the IGDB app token).
//! Absence of a key is a normal outcome, not an error.

mod memory;
mod redis;

pub use memory::MemoryCache;
pub use redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Cache transport errors. Key absence is never an error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// Key/value store with absolute per-entry TTL.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Fetch a value. `None` means the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value, overwriting unconditionally and resetting the expiry.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache key holding the current refresh-token opaque value for a user.
pub fn user_key(user_id: Uuid) -> String {
    format!("userId:{user_id}")
}

/// Cache key mapping a password-reset token to a user id.
pub fn reset_key(token: &str) -> String {
    format!("reset-token:{token}")
}
