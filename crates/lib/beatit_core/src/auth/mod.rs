//! Authentication and session lifecycle.
//!
//! Password hashing, access/refresh token handling, and the orchestrator
//! that ties them to the user store and session cache.

pub mod password;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenIssuer;
