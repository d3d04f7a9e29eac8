/**
 * Server Initialization
 *
 * Builds the application from a `ServerConfig`:
 * 1. Open the SQLite pool and apply migrations
 * 2. Select the media store (Cloudinary when configured, otherwise memory)
 * 3. Build the session issuer and credential store
 * 4. Assemble `AppState` and the router
 */

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::passwords::{PasswordError, PasswordHasher};
use crate::backend::auth::sessions::SessionIssuer;
use crate::backend::media::{CloudinaryMediaStore, MediaError, MediaStore, MemoryMediaStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Media store setup failed: {0}")]
    Media(#[from] MediaError),

    #[error("Password hasher setup failed: {0}")]
    Password(#[from] PasswordError),
}

/// Open the SQLite pool and bring the schema up to date
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, InitError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), InitError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Cloudinary when credentials are configured, otherwise in-memory
pub fn media_store_from_config(config: &ServerConfig) -> Result<Arc<dyn MediaStore>, InitError> {
    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!(cloud = %cloudinary.cloud_name, "Using Cloudinary media store");
            let store = CloudinaryMediaStore::new(cloudinary.clone(), config.media_timeout)?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("Cloudinary not configured, images are kept in memory only");
            Ok(Arc::new(MemoryMediaStore::new()))
        }
    }
}

/// Assemble the application state from already-created services
pub fn build_state(
    config: ServerConfig,
    db: SqlitePool,
    media: Arc<dyn MediaStore>,
) -> Result<AppState, InitError> {
    let sessions = SessionIssuer::new(&config.jwt_secret);
    let passwords = PasswordHasher::new(config.bcrypt_cost)?;

    Ok(AppState {
        db,
        config: Arc::new(config),
        sessions,
        passwords,
        media,
    })
}

/// Create the fully configured application router
pub async fn create_app(config: ServerConfig) -> Result<Router, InitError> {
    tracing::info!("Initializing SocialHub backend server");

    let db = connect_database(&config.database_url).await?;
    let media = media_store_from_config(&config)?;
    let state = build_state(config, db, media)?;

    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}
