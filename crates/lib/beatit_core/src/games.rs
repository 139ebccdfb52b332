//! Local game catalog queries.
//!
//! The `games` table mirrors the slice of the IGDB catalog users have
//! touched; rows are created on demand when a backlog or completed entry
//! references an IGDB id for the first time.

use sqlx::PgPool;

use crate::error::{CoreError, CoreResult};
use crate::igdb::IgdbClient;
use crate::models::Game;

/// Resolve an IGDB id to a local game row, creating one from the catalog
/// when it is not yet known locally.
pub async fn get_or_create_game(
    pool: &PgPool,
    igdb: &IgdbClient,
    igdb_game_id: i32,
) -> CoreResult<Game> {
    if let Some(game) = find_by_igdb_id(pool, igdb_game_id).await? {
        return Ok(game);
    }

    let Some(catalog_game) = igdb.get_game(igdb_game_id).await? else {
        return Err(CoreError::NotFound("game".into()));
    };

    // Concurrent first references race on the unique igdb_game_id; the
    // loser re-reads the winner's row.
    let inserted = sqlx::query_as::<_, Game>(
        "INSERT INTO games (igdb_game_id, name) VALUES ($1, $2) \
         ON CONFLICT (igdb_game_id) DO NOTHING \
         RETURNING id, igdb_game_id, name",
    )
    .bind(igdb_game_id)
    .bind(&catalog_game.name)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(game) => Ok(game),
        None => find_by_igdb_id(pool, igdb_game_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("game".into())),
    }
}

pub async fn find_by_igdb_id(pool: &PgPool, igdb_game_id: i32) -> CoreResult<Option<Game>> {
    let game = sqlx::query_as::<_, Game>(
        "SELECT id, igdb_game_id, name FROM games WHERE igdb_game_id = $1",
    )
    .bind(igdb_game_id)
    .fetch_optional(pool)
    .await?;
    Ok(game)
}

pub async fn list_games(pool: &PgPool) -> CoreResult<Vec<Game>> {
    let games =
        sqlx::query_as::<_, Game>("SELECT id, igdb_game_id, name FROM games ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(games)
}
