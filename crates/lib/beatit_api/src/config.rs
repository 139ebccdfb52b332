//! API server configuration.
//!
//! All environment access happens here, once, at startup. Handlers and
//! services only ever see the resulting struct.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL for the session cache.
    pub redis_url: String,
    /// JWT signing secret. No default: a guessable secret would sign
    /// forgeable sessions.
    pub jwt_secret: String,
    /// Twitch/IGDB application credentials. Empty strings disable catalog
    /// lookups; only backlog/completed additions need them.
    pub igdb_client_id: String,
    pub igdb_client_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable             | Default                                  |
    /// |----------------------|------------------------------------------|
    /// | `BIND_ADDR`          | `127.0.0.1:8080`                         |
    /// | `DATABASE_URL`       | `postgres://localhost:5432/beatit`       |
    /// | `REDIS_URL`          | `redis://127.0.0.1:6379`                 |
    /// | `JWT_SECRET`         | required                                 |
    /// | `IGDB_CLIENT_ID`     | empty (catalog lookups disabled)         |
    /// | `IGDB_CLIENT_SECRET` | empty                                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/beatit".into()),
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
            igdb_client_id: std::env::var("IGDB_CLIENT_ID").unwrap_or_default(),
            igdb_client_secret: std::env::var("IGDB_CLIENT_SECRET").unwrap_or_default(),
        })
    }
}
