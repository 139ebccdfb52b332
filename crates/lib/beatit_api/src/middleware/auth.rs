//! Authentication middleware — access-token cookie verification.
//!
//! Every failure path returns a terminal 401 response; the inner handler
//! never runs with an unverified identity.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use beatit_core::models::User;

use crate::AppState;
use crate::error::ApiError;
use crate::services::cookies::ACCESS_COOKIE;

/// Verified user stored in request extensions for protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Axum middleware: extracts the `AccessToken` cookie, verifies the JWT
/// (signature, algorithm, expiry), loads the user, and injects
/// `CurrentUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("Missing access token".into()))?;

    // Signature is always verified before the subject is trusted.
    let user_id = state
        .auth
        .token_issuer()
        .user_id_from_token(&token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))?;

    let user = state
        .user_store
        .get_by_id(user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".into()))?;

    if !user.active {
        return Err(ApiError::Unauthorized("Account is deactivated".into()));
    }

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
