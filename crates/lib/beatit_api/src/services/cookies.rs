//! Cookie service — set/get/clear httpOnly auth cookies.
//!
//! Cookie lifetimes track the token lifetimes: the access cookie dies with
//! the JWT, the refresh cookie with the cached refresh entry.

use axum_extra::extract::cookie::{Cookie, SameSite};
use beatit_core::auth::token::ACCESS_TOKEN_EXPIRY_SECS;
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_COOKIE: &str = "AccessToken";
/// Cookie name for the refresh token (composite `"{userId}:{opaque}"`).
pub const REFRESH_COOKIE: &str = "RefreshToken";

/// Build a httpOnly cookie for the access token (15 minutes).
pub fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS))
        .build()
}

/// Build a httpOnly cookie for the refresh token (30 days).
pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(30))
        .build()
}

/// Build an expired cookie to clear the access token.
pub fn clear_access_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

/// Build an expired cookie to clear the refresh token.
pub fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}
