//! Domain error taxonomy.
//!
//! Expected failures cross the crate boundary as `CoreError` values; only
//! startup misconfiguration is allowed to abort the process.

use thiserror::Error;

use crate::auth::token::TokenError;
use crate::cache::CacheError;

/// Convenience alias for core service return types.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core errors with a stable kind per failure mode.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Login failure. Intentionally identical for unknown email and wrong
    /// password so responses cannot be used to enumerate accounts.
    #[error("Username or password is invalid")]
    InvalidCredentials,

    /// Refresh token malformed, unknown, or superseded by rotation.
    #[error("Token is invalid")]
    InvalidToken,

    /// Missing/expired/invalid access token at the request gate.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for CoreError {
    fn from(e: TokenError) -> Self {
        match e {
            // Failures while minting a token are server-side faults, not
            // client token problems.
            TokenError::Encoding(msg) => CoreError::Internal(msg),
            _ => CoreError::InvalidToken,
        }
    }
}
