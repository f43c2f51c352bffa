use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod service;
mod state;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::migrate::Migrator;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{
    config::ServiceConfig, middleware::JwtConfig, repositories::PgWatchlistRepository,
    service::WatchlistService, state::AppState,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting watchlist service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if config.run_migrations {
        run_migrations(&pool, &MIGRATOR).await?;
    }

    let jwt = Arc::new(JwtConfig::from_env()?);
    let repository = PgWatchlistRepository::new(pool);

    let app_state = AppState {
        watchlist: WatchlistService::new(repository, config.include_details),
        jwt,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("Watchlist service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
