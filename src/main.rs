//! Tradehub server binary.
//!
//! Loads configuration, initializes tracing and the database pool, wires
//! the adapters, and serves the API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use tradehub::adapters::auth::{Argon2PasswordHasher, JwtAuth};
use tradehub::adapters::http::{build_router, AppContext};
use tradehub::adapters::storage::LocalFileStore;
use tradehub::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let jwt = Arc::new(JwtAuth::new(&config.auth));
    let ctx = AppContext {
        pool,
        session_validator: jwt.clone(),
        token_issuer: jwt,
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        file_store: Arc::new(LocalFileStore::new(
            config.storage.upload_dir.clone(),
            config.storage.max_upload_bytes,
        )),
        max_upload_bytes: config.storage.max_upload_bytes,
    };

    let app = build_router(ctx, &config.server);
    let addr = config.server.socket_addr();
    tracing::info!(%addr, "tradehub listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
