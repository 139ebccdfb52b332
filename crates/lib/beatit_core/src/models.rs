//! Domain models.
//!
//! These are internal domain types; HTTP request/response shapes live in
//! `beatit_api`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. `password_hash` and `salt` are base64 strings owned by
/// the password hasher; everything else is plain profile data.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User profile without credential material, safe to serialize outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A game known locally, keyed by its IGDB catalog id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Game {
    pub id: i32,
    pub igdb_game_id: i32,
    pub name: String,
}

/// A backlog entry joined with its game name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BacklogItem {
    pub game_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for marking a game as completed.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedGameInput {
    pub rating: i32,
    pub difficulty: i32,
    pub notes: Option<String>,
    pub platform: Option<String>,
    pub time_to_complete_minutes: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
}

/// A completed-list entry joined with its game name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CompletedGameItem {
    pub game_name: String,
    pub rating: i32,
    pub difficulty: i32,
    pub notes: Option<String>,
    pub platform: Option<String>,
    pub time_to_complete_minutes: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
}

/// Access + refresh token pair returned by the auth flows. The refresh
/// token is the composite `"{userId}:{opaque}"` form.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
