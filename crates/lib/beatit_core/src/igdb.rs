//! IGDB catalog client.
//!
//! IGDB sits behind Twitch's OAuth: an app access token is obtained via the
//! client-credentials flow and cached for its advertised lifetime, then sent
//! as a bearer alongside the Client-ID header. Queries use the IGDB query
//! body syntax (`fields ...; where ...;`).

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cache::SessionCache;
use crate::error::{CoreError, CoreResult};

const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const IGDB_GAMES_URL: &str = "https://api.igdb.com/v4/games";

/// Cache key holding the current IGDB app access token.
const IGDB_TOKEN_KEY: &str = "igdb-token";

/// Safety margin subtracted from the advertised token lifetime so a cached
/// token never outlives its validity window.
const TOKEN_TTL_MARGIN_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct IgdbGame {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TwitchTokenResponse {
    access_token: String,
    expires_in: u64,
}

pub struct IgdbClient {
    http: reqwest::Client,
    cache: Arc<dyn SessionCache>,
    client_id: String,
    client_secret: String,
    token_url: String,
    games_url: String,
}

impl IgdbClient {
    pub fn new(cache: Arc<dyn SessionCache>, client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache,
            client_id,
            client_secret,
            token_url: TWITCH_TOKEN_URL.to_string(),
            games_url: IGDB_GAMES_URL.to_string(),
        }
    }

    /// Point the client at alternate endpoints (local mock servers).
    pub fn with_endpoints(mut self, token_url: String, games_url: String) -> Self {
        self.token_url = token_url;
        self.games_url = games_url;
        self
    }

    /// Look up a game by its IGDB id. `None` when the catalog has no match.
    pub async fn get_game(&self, igdb_game_id: i32) -> CoreResult<Option<IgdbGame>> {
        let token = self.app_token().await?;
        let body = format!("fields name; where id = {igdb_game_id};");

        let response = self
            .http
            .post(&self.games_url)
            .header("Client-ID", &self.client_id)
            .bearer_auth(&token)
            .body(body)
            .send()
            .await
            .map_err(|e| CoreError::Catalog(format!("igdb request: {e}")))?;

        if !response.status().is_success() {
            return Err(CoreError::Catalog(format!(
                "igdb responded {}",
                response.status()
            )));
        }

        let mut games: Vec<IgdbGame> = response
            .json()
            .await
            .map_err(|e| CoreError::Catalog(format!("igdb response: {e}")))?;
        Ok(if games.is_empty() {
            None
        } else {
            Some(games.swap_remove(0))
        })
    }

    /// Return the cached app token, fetching a fresh one from Twitch when
    /// the cache has none.
    async fn app_token(&self) -> CoreResult<String> {
        if let Some(token) = self.cache.get(IGDB_TOKEN_KEY).await? {
            return Ok(token);
        }

        debug!("fetching fresh igdb app token");
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| CoreError::Catalog(format!("twitch token request: {e}")))?;

        if !response.status().is_success() {
            return Err(CoreError::Catalog(format!(
                "twitch token endpoint responded {}",
                response.status()
            )));
        }

        let token: TwitchTokenResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Catalog(format!("twitch token response: {e}")))?;

        let ttl = Duration::from_secs(token.expires_in.saturating_sub(TOKEN_TTL_MARGIN_SECS));
        if !ttl.is_zero() {
            self.cache
                .set(IGDB_TOKEN_KEY, &token.access_token, ttl)
                .await?;
        }
        Ok(token.access_token)
    }
}
