//! # beatit_api
//!
//! HTTP API library for BeatIt.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use beatit_core::auth::{AuthService, TokenIssuer};
use beatit_core::cache::SessionCache;
use beatit_core::igdb::IgdbClient;
use beatit_core::store::UserStore;
use beatit_core::users::UserService;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, backlog, completed, games, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool for the game/backlog queries.
    pub pool: PgPool,
    /// User repository (also used by the auth gate).
    pub user_store: Arc<dyn UserStore>,
    /// Session cache behind the auth flows and the IGDB token.
    pub cache: Arc<dyn SessionCache>,
    /// Auth orchestrator.
    pub auth: Arc<AuthService>,
    /// User management service.
    pub users: Arc<UserService>,
    /// IGDB catalog client.
    pub igdb: Arc<IgdbClient>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire the domain services over the given persistence handles.
    pub fn new(
        pool: PgPool,
        user_store: Arc<dyn UserStore>,
        cache: Arc<dyn SessionCache>,
        config: ApiConfig,
    ) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret.as_bytes());
        let auth = Arc::new(AuthService::new(
            user_store.clone(),
            cache.clone(),
            tokens,
        ));
        let users = Arc::new(UserService::new(user_store.clone()));
        let igdb = Arc::new(IgdbClient::new(
            cache.clone(),
            config.igdb_client_id.clone(),
            config.igdb_client_secret.clone(),
        ));
        Self {
            pool,
            user_store,
            cache,
            auth,
            users,
            igdb,
            config,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `beatit_core::migrate::migrate()` which owns the migration
/// files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    beatit_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/refresh", post(auth::refresh_handler))
        .route(
            "/api/auth/forgot-password",
            post(auth::forgot_password_handler),
        )
        .route(
            "/api/auth/reset-password",
            post(auth::reset_password_handler),
        )
        .route("/api/users/register", post(users::register_handler));

    // Protected routes (require a valid access-token cookie)
    let protected = Router::new()
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/users", get(users::list_users_handler))
        .route("/api/users", patch(users::update_user_handler))
        .route("/api/users/me", get(users::me_handler))
        .route("/api/users/{id}", delete(users::delete_user_handler))
        .route("/api/games", get(games::list_games_handler))
        .route("/api/backlog", get(backlog::list_handler))
        .route("/api/backlog/{igdb_id}", post(backlog::add_handler))
        .route("/api/backlog/{igdb_id}", delete(backlog::remove_handler))
        .route("/api/completed", get(completed::list_handler))
        .route("/api/completed/{igdb_id}", post(completed::add_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
