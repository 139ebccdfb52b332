//! Completed-list request handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use beatit_core::completed;
use beatit_core::models::{CompletedGameInput, CompletedGameItem};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;

/// `POST /api/completed/{igdb_id}` — record a game as completed.
pub async fn add_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(igdb_id): Path<i32>,
    Json(body): Json<CompletedGameInput>,
) -> AppResult<StatusCode> {
    completed::add_game(&state.pool, &state.igdb, user.id, igdb_id, &body).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /api/completed` — the authenticated user's completed games.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CompletedGameItem>>> {
    Ok(Json(completed::list(&state.pool, user.id).await?))
}
