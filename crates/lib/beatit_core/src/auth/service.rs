//! Auth orchestrator — login, refresh, password reset, and logout flows.
//!
//! Coordinates the password hasher, token issuer, session cache, and user
//! store. Session tokens are stateless; all mutable session state is the
//! refresh-token entry and the short-lived reset-token entries in the cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::password;
use super::token::{self, TokenIssuer};
use crate::cache::{SessionCache, reset_key, user_key};
use crate::error::CoreError;
use crate::models::{TokenPair, User};
use crate::store::UserStore;

/// Refresh token lifetime: 30 days, sliding (reset on every rotation).
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Password-reset token lifetime: 15 minutes, single use.
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

pub struct AuthService {
    users: Arc<dyn UserStore>,
    cache: Arc<dyn SessionCache>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        cache: Arc<dyn SessionCache>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            users,
            cache,
            tokens,
        }
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Authenticate with email + password, minting an access token and a
    /// fresh composite refresh token `"{userId}:{opaque}"`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, CoreError> {
        let Some(user) = self.users.get_by_email(email).await? else {
            // Same error as a wrong password; responses must not reveal
            // whether the email is registered.
            info!("login failed - invalid email/password");
            return Err(CoreError::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password_hash, &user.salt) {
            info!("login failed - invalid email/password");
            return Err(CoreError::InvalidCredentials);
        }

        let pair = self.mint_token_pair(&user).await?;
        info!(user_id = %user.id, "login successful");
        Ok(pair)
    }

    /// Exchange a composite refresh token for a new token pair, rotating the
    /// cached opaque value.
    ///
    /// Only the most recently issued opaque value per user is valid: a
    /// superseded composite fails the cache comparison and is rejected.
    /// Two concurrent refreshes with the same valid token can both pass the
    /// comparison before either overwrites the entry (the cache has no
    /// compare-and-swap); last write wins and the earlier composite is
    /// silently superseded. Known race, accepted for this design.
    pub async fn refresh(&self, composite: &str) -> Result<TokenPair, CoreError> {
        let parts: Vec<&str> = composite.split(':').collect();
        let [user_id, opaque] = parts.as_slice() else {
            return Err(CoreError::InvalidToken);
        };
        let user_id: Uuid = user_id.parse().map_err(|_| CoreError::InvalidToken)?;

        let Some(user) = self.users.get_by_id(user_id).await? else {
            return Err(CoreError::InvalidToken);
        };

        let cached = self.cache.get(&user_key(user.id)).await?;
        if cached.as_deref() != Some(*opaque) {
            debug!(user_id = %user.id, "refresh rejected - stale or unknown opaque value");
            return Err(CoreError::InvalidToken);
        }

        let pair = self.mint_token_pair(&user).await?;
        debug!(user_id = %user.id, "refresh token rotated");
        Ok(pair)
    }

    /// Start a password reset: store an opaque token mapping to the user for
    /// 15 minutes.
    ///
    /// Returns `Ok(Some(token))` when the email is registered and `Ok(None)`
    /// when it is not — never an error, so callers can answer both cases
    /// with the same generic confirmation and leak nothing. The token is
    /// handed to the mail collaborator, never to the HTTP response.
    pub async fn send_reset_email(&self, email: &str) -> Result<Option<String>, CoreError> {
        let Some(user) = self.users.get_by_email(email).await? else {
            debug!("reset requested for unknown email");
            return Ok(None);
        };

        let token = token::generate_refresh_value();
        self.cache
            .set(&reset_key(&token), &user.id.to_string(), RESET_TOKEN_TTL)
            .await?;
        info!(user_id = %user.id, "password reset token issued");
        Ok(Some(token))
    }

    /// Consume a reset token and set a new password.
    ///
    /// The token is deleted before the password update so it is single-use
    /// even within its TTL window. All outstanding refresh tokens for the
    /// user are invalidated along with the old password.
    pub async fn reset_password(&self, new_password: &str, token: &str) -> Result<(), CoreError> {
        if new_password.len() < 8 {
            return Err(CoreError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        let key = reset_key(token);
        let Some(user_id) = self.cache.get(&key).await? else {
            return Err(CoreError::NotFound("reset token".into()));
        };
        self.cache.delete(&key).await?;

        let user_id: Uuid = user_id
            .parse()
            .map_err(|_| CoreError::Internal("malformed reset-token mapping".into()))?;
        let Some(mut user) = self.users.get_by_id(user_id).await? else {
            return Err(CoreError::NotFound("user".into()));
        };

        let salt = password::generate_salt();
        user.password_hash = password::hash_password(new_password, &salt)?;
        user.salt = password::encode_salt(&salt);
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        // Outstanding refresh tokens die with the old password.
        self.cache.delete(&user_key(user.id)).await?;
        info!(user_id = %user.id, "password reset completed");
        Ok(())
    }

    /// Invalidate the user's current refresh token. Already-issued access
    /// tokens stay valid until they expire; stateless tokens cannot be
    /// revoked without a denylist, which this design does not carry.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), CoreError> {
        self.cache.delete(&user_key(user_id)).await?;
        info!(user_id = %user_id, "logged out");
        Ok(())
    }

    async fn mint_token_pair(&self, user: &User) -> Result<TokenPair, CoreError> {
        let access_token = self.tokens.generate_access_token(user)?;
        let opaque = token::generate_refresh_value();
        if let Err(e) = self
            .cache
            .set(&user_key(user.id), &opaque, REFRESH_TOKEN_TTL)
            .await
        {
            warn!(user_id = %user.id, error = %e, "failed to persist refresh token");
            return Err(e.into());
        }
        Ok(TokenPair {
            access_token,
            refresh_token: format!("{}:{opaque}", user.id),
        })
    }
}
