//! User request handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use beatit_core::models::UserProfile;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::models::{RegisterRequest, UpdateUserRequest};

/// `POST /api/users/register` — create an account. Public.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state
        .users
        .register(&body.name, &body.email, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /api/users/me` — the authenticated user's profile.
pub async fn me_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// `GET /api/users` — list all profiles.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.users.list().await?))
}

/// `PATCH /api/users` — update the authenticated user's name/email.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<UpdateUserRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .users
        .update(user.id, body.name.as_deref(), body.email.as_deref())
        .await?;
    Ok(Json(profile))
}

/// `DELETE /api/users/{id}` — deactivate an account. Users can only delete
/// themselves; the session is ended along with the account.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if id != user.id {
        return Err(ApiError::Forbidden("Cannot delete another account".into()));
    }
    state.users.soft_delete(id).await?;
    state.auth.logout(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
