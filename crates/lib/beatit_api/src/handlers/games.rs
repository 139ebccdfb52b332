//! Game catalog request handlers.

use axum::Json;
use axum::extract::State;
use beatit_core::games;
use beatit_core::models::Game;

use crate::AppState;
use crate::error::AppResult;

/// `GET /api/games` — every game known locally.
pub async fn list_games_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Game>>> {
    Ok(Json(games::list_games(&state.pool).await?))
}
