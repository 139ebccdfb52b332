//! Authentication request handlers.
//!
//! Tokens travel exclusively in httpOnly cookies; response bodies carry
//! only status messages.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::AppState;
use crate::error::{ApiError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::models::{ForgotPasswordRequest, LoginRequest, MessageResponse, ResetPasswordRequest};
use crate::services::cookies;

/// Identical reply whether or not the email is registered.
const RESET_CONFIRMATION: &str = "If the email is registered, a reset link has been sent";

/// `POST /api/auth/login` — authenticate with email + password, setting the
/// token cookies on success.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let pair = state.auth.login(&body.email, &body.password).await?;

    let jar = jar
        .add(cookies::access_cookie(&pair.access_token))
        .add(cookies::refresh_cookie(&pair.refresh_token));
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged in".into(),
        }),
    ))
}

/// `POST /api/auth/refresh` — rotate the refresh token and reissue both
/// cookies. 401 when the cookie is missing, stale, or forged.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    let composite = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::InvalidToken)?;

    let pair = state.auth.refresh(&composite).await?;

    let jar = jar
        .add(cookies::access_cookie(&pair.access_token))
        .add(cookies::refresh_cookie(&pair.refresh_token));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `POST /api/auth/logout` — drop the cached refresh token and clear both
/// cookies. Requires authentication.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    state.auth.logout(user.id).await?;

    let jar = jar
        .add(cookies::clear_access_cookie())
        .add(cookies::clear_refresh_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `POST /api/auth/forgot-password` — issue a reset token. The response is
/// the same generic confirmation whether or not the email exists.
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(_token) = state.auth.send_reset_email(&body.email).await? {
        // Hand-off point for the mail sender; the token never reaches the
        // HTTP response.
        debug!("reset token issued, delivery pending");
    }
    Ok(Json(MessageResponse {
        message: RESET_CONFIRMATION.into(),
    }))
}

/// `POST /api/auth/reset-password` — consume a reset token and set a new
/// password. Outstanding refresh tokens are invalidated.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth.reset_password(&body.password, &body.token).await?;
    Ok(Json(MessageResponse {
        message: "Password has been reset".into(),
    }))
}
