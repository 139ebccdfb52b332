//! BeatIt API server binary.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use beatit_api::config::ApiConfig;
use beatit_core::cache::RedisCache;
use beatit_core::store::PgUserStore;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "beatit_server", about = "BeatIt API server")]
struct Args {
    /// Maximum number of database connections in the pool.
    #[arg(long, env = "PG_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,beatit_api=debug,beatit_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let config = ApiConfig::from_env()?;

    info!(bind_addr = %config.bind_addr, "starting beatit_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    beatit_api::migrate(&pool).await?;

    let cache = RedisCache::connect(&config.redis_url).await?;
    let user_store = PgUserStore::new(pool.clone());

    let state = beatit_api::AppState::new(
        pool,
        Arc::new(user_store),
        Arc::new(cache),
        config.clone(),
    );
    let app = beatit_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
