//! Database operations for the Tandoori Table `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Site authentication and the admin flag
//! - `menu` - The regular menu
//! - `orders` / `order_items` - Order history (append-only, denormalized item names)
//! - `groups` / `group_members` - Interest groups derived from order history
//! - `offers` - Group-targeted, capacity- and time-limited offers
//! - `specials` - Admin-curated daily specials
//! - `supplier_items` - Ingredient listings published by users
//! - `diet_menu_requests` - Diet plan requests reviewed by admins
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run at startup,
//! or explicitly via:
//! ```bash
//! cargo run -p tandoori-cli -- migrate
//! ```

pub mod diet;
pub mod groups;
pub mod menu;
pub mod offers;
pub mod orders;
pub mod specials;
pub mod suppliers;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use diet::DietRepository;
pub use groups::GroupRepository;
pub use menu::MenuRepository;
pub use offers::OfferRepository;
pub use orders::OrderRepository;
pub use specials::SpecialRepository;
pub use suppliers::SupplierRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Enables foreign keys and WAL mode, and creates the database file if it
/// does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Run the embedded migrations against a pool.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
