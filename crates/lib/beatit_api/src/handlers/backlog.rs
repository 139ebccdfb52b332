//! Backlog request handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use beatit_core::backlog;
use beatit_core::models::BacklogItem;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;

/// `POST /api/backlog/{igdb_id}` — add a game to the backlog.
pub async fn add_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(igdb_id): Path<i32>,
) -> AppResult<StatusCode> {
    backlog::add_game(&state.pool, &state.igdb, user.id, igdb_id).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /api/backlog` — the authenticated user's backlog.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BacklogItem>>> {
    Ok(Json(backlog::list(&state.pool, user.id).await?))
}

/// `DELETE /api/backlog/{igdb_id}` — remove a game from the backlog.
pub async fn remove_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(igdb_id): Path<i32>,
) -> AppResult<StatusCode> {
    backlog::remove_game(&state.pool, user.id, igdb_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
