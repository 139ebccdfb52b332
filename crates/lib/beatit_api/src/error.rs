//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use beatit_core::error::CoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, ApiError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Username or password is invalid",
            ),
            ApiError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", "Token is invalid")
            }
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            ApiError::CacheUnavailable(m) => {
                error!(detail = %m, "session cache unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "cache_unavailable",
                    "Service temporarily unavailable",
                )
            }
            ApiError::CatalogUnavailable(m) => {
                error!(detail = %m, "game catalog unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "catalog_unavailable",
                    "Game catalog temporarily unavailable",
                )
            }
            ApiError::Internal(m) => {
                error!(detail = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidCredentials => ApiError::InvalidCredentials,
            CoreError::InvalidToken => ApiError::InvalidToken,
            CoreError::Unauthorized(m) => ApiError::Unauthorized(m),
            CoreError::NotFound(m) => ApiError::NotFound(m),
            CoreError::Conflict(m) => ApiError::Conflict(m),
            CoreError::Validation(m) => ApiError::Validation(m),
            CoreError::Cache(e) => ApiError::CacheUnavailable(e.to_string()),
            CoreError::Db(sqlx::Error::RowNotFound) => ApiError::NotFound("row not found".into()),
            CoreError::Db(e) => ApiError::Internal(e.to_string()),
            CoreError::Catalog(m) => ApiError::CatalogUnavailable(m),
            CoreError::Internal(m) => ApiError::Internal(m),
        }
    }
}
