//! Menu repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{ItemName, MenuItemId, Price};

use super::RepositoryError;

/// A row on the regular menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub item_name: ItemName,
    pub category: String,
    pub price: Price,
}

fn map_item(row: &SqliteRow) -> Result<MenuItem, RepositoryError> {
    let name: String = row.try_get("item_name")?;
    let item_name = ItemName::parse(&name)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid menu item name: {e}")))?;
    let price = Price::from_rupees(row.try_get("price")?)
        .ok_or_else(|| RepositoryError::DataCorruption("negative menu price".to_owned()))?;

    Ok(MenuItem {
        id: row.try_get("id")?,
        item_name,
        category: row.try_get("category")?,
        price,
    })
}

/// Repository for the regular menu.
pub struct MenuRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the entire menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query("SELECT id, item_name, category, price FROM menu ORDER BY id ASC")
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(map_item).collect()
    }

    /// Search the menu by item name or category (substring match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<MenuItem>, RepositoryError> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(
            r"
            SELECT id, item_name, category, price
            FROM menu
            WHERE item_name LIKE ? OR category LIKE ?
            ORDER BY id ASC
            ",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_item).collect()
    }

    /// Get a single menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query("SELECT id, item_name, category, price FROM menu WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(map_item).transpose()
    }

    /// Insert a menu item (used by the seed command).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        item_name: &ItemName,
        category: &str,
        price: Price,
    ) -> Result<MenuItemId, RepositoryError> {
        let result = sqlx::query("INSERT INTO menu (item_name, category, price) VALUES (?, ?, ?)")
            .bind(item_name.as_str())
            .bind(category)
            .bind(price.rupees())
            .execute(self.pool)
            .await?;

        Ok(MenuItemId::new(result.last_insert_rowid()))
    }

    /// Number of rows on the menu (used by the seed command to stay idempotent).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM menu")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
