//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::SqlitePool;
use thiserror::Error;

use tandoori_server::config::{ConfigError, ServerConfig};
use tandoori_server::db;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] tandoori_server::db::RepositoryError),

    #[error("auth error: {0}")]
    Auth(#[from] tandoori_server::services::AuthError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the configured database.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    Ok(pool)
}
