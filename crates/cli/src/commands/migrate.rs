//! Database migration command.

use tandoori_server::db;

use super::{CommandError, connect};

/// Run the server's embedded migrations against the configured database.
///
/// # Errors
///
/// Returns `CommandError` if the connection or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
