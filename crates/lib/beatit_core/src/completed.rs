//! Completed-list queries: games a user has beaten, with play metadata.

use sqlx::PgPool;
use uuid::Uuid;

use crate::backlog::is_unique_violation;
use crate::error::{CoreError, CoreResult};
use crate::games;
use crate::igdb::IgdbClient;
use crate::models::{CompletedGameInput, CompletedGameItem};

/// Record a game as completed. The game row is created from the IGDB
/// catalog on first reference; completing the same game twice is a
/// conflict.
pub async fn add_game(
    pool: &PgPool,
    igdb: &IgdbClient,
    user_id: Uuid,
    igdb_game_id: i32,
    entry: &CompletedGameInput,
) -> CoreResult<()> {
    let game = games::get_or_create_game(pool, igdb, igdb_game_id).await?;

    let result = sqlx::query(
        "INSERT INTO completed_games \
         (user_id, game_id, rating, difficulty, notes, platform, \
          time_to_complete_minutes, started_at, finished_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(user_id)
    .bind(game.id)
    .bind(entry.rating)
    .bind(entry.difficulty)
    .bind(&entry.notes)
    .bind(&entry.platform)
    .bind(entry.time_to_complete_minutes)
    .bind(entry.started_at)
    .bind(entry.finished_at)
    .execute(pool)
    .await;
    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => {
            Err(CoreError::Conflict("game already completed".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// List the user's completed games with names, most recently finished first.
pub async fn list(pool: &PgPool, user_id: Uuid) -> CoreResult<Vec<CompletedGameItem>> {
    let items = sqlx::query_as::<_, CompletedGameItem>(
        "SELECT g.name AS game_name, c.rating, c.difficulty, c.notes, c.platform, \
         c.time_to_complete_minutes, c.started_at, c.finished_at \
         FROM completed_games c JOIN games g ON g.id = c.game_id \
         WHERE c.user_id = $1 ORDER BY c.finished_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
