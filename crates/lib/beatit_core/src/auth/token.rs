//! Access token issuing/validation and refresh-token opaque values.
//!
//! Access tokens are HS256 JWTs carrying the user id and display name,
//! valid for 15 minutes. Refresh tokens have no decodable structure; they
//! are random bearer secrets whose authoritative copy lives in the session
//! cache.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Token errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,

    #[error("missing claim: {0}")]
    MissingClaim(String),

    #[error("unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("token encoding: {0}")]
    Encoding(String),
}

/// Claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — user id (standard JWT `sub` claim).
    pub sub: String,
    /// User display name.
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

/// Issues and validates signed access tokens with a server-held symmetric
/// secret. Cheap to clone; the keys are reference-counted internally.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Generate a signed access token for `user` (HS256, 15 min expiry).
    pub fn generate_access_token(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify signature and algorithm, returning the claims. Expiry is
    /// enforced unless `allow_expired` is set; there is no clock leeway.
    pub fn validate_access_token(
        &self,
        token: &str,
        allow_expired: bool,
    ) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = !allow_expired;
        decode::<AccessClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(map_decode_error)
    }

    /// Extract the subject user id from `token`. The signature (and expiry)
    /// are always validated first — the subject of an unverified token is
    /// never trusted.
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.validate_access_token(token, false)?;
        claims
            .sub
            .parse()
            .map_err(|_| TokenError::MissingClaim("sub".into()))
    }
}

/// Generate a fresh refresh-token opaque value (UUIDv4 bearer secret).
pub fn generate_refresh_value() -> String {
    Uuid::new_v4().to_string()
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;
    match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmMismatch
        }
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            salt: String::new(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn roundtrip_carries_subject_and_name() {
        let issuer = TokenIssuer::new(b"test-secret");
        let user = test_user();

        let token = issuer.generate_access_token(&user).unwrap();
        let claims = issuer.validate_access_token(&token, false).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.name, "Alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_secret_is_rejected_before_subject_is_read() {
        let issuer = TokenIssuer::new(b"test-secret");
        let other = TokenIssuer::new(b"different-secret");
        let token = other.generate_access_token(&test_user()).unwrap();

        assert_eq!(
            issuer.validate_access_token(&token, false).unwrap_err(),
            TokenError::InvalidSignature
        );
        assert!(issuer.user_id_from_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected_unless_allowed() {
        let issuer = TokenIssuer::new(b"test-secret");
        let user = test_user();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            issuer.validate_access_token(&token, false).unwrap_err(),
            TokenError::Expired
        );
        // Signature is still checked when expiry is waived.
        let claims = issuer.validate_access_token(&token, true).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[test]
    fn garbage_is_malformed() {
        let issuer = TokenIssuer::new(b"test-secret");
        assert_eq!(
            issuer
                .validate_access_token("not-a-jwt", false)
                .unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn algorithm_confusion_is_rejected() {
        let issuer = TokenIssuer::new(b"test-secret");
        let user = test_user();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            issuer.validate_access_token(&token, false).unwrap_err(),
            TokenError::AlgorithmMismatch
        );
    }

    #[test]
    fn refresh_values_are_unique() {
        assert_ne!(generate_refresh_value(), generate_refresh_value());
    }

    #[test]
    fn user_id_from_token_parses_subject() {
        let issuer = TokenIssuer::new(b"test-secret");
        let user = test_user();
        let token = issuer.generate_access_token(&user).unwrap();

        assert_eq!(issuer.user_id_from_token(&token).unwrap(), user.id);
    }
}
