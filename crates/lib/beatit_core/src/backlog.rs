//! Backlog queries: the games a user intends to play.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::games;
use crate::igdb::IgdbClient;
use crate::models::BacklogItem;

/// Add a game to the user's backlog. The game row is created from the IGDB
/// catalog on first reference.
pub async fn add_game(
    pool: &PgPool,
    igdb: &IgdbClient,
    user_id: Uuid,
    igdb_game_id: i32,
) -> CoreResult<()> {
    let game = games::get_or_create_game(pool, igdb, igdb_game_id).await?;

    let result = sqlx::query("INSERT INTO backlog (user_id, game_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(game.id)
        .execute(pool)
        .await;
    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => {
            Err(CoreError::Conflict("game already in backlog".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// List the user's backlog with game names, newest first.
pub async fn list(pool: &PgPool, user_id: Uuid) -> CoreResult<Vec<BacklogItem>> {
    let items = sqlx::query_as::<_, BacklogItem>(
        "SELECT g.name AS game_name, b.created_at \
         FROM backlog b JOIN games g ON g.id = b.game_id \
         WHERE b.user_id = $1 ORDER BY b.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Remove a game from the user's backlog.
pub async fn remove_game(pool: &PgPool, user_id: Uuid, igdb_game_id: i32) -> CoreResult<()> {
    let result = sqlx::query(
        "DELETE FROM backlog WHERE user_id = $1 \
         AND game_id = (SELECT id FROM games WHERE igdb_game_id = $2)",
    )
    .bind(user_id)
    .bind(igdb_game_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("backlog entry".into()));
    }
    Ok(())
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
