//! Daily specials persistence.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{ItemName, Price, SpecialId};

use super::RepositoryError;
use crate::models::special::Special;

fn map_special(row: &SqliteRow) -> Result<Special, RepositoryError> {
    let price_rupees: i64 = row.try_get("price")?;
    let price = Price::from_rupees(price_rupees).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("negative special price: {price_rupees}"))
    })?;

    let name: String = row.try_get("item_name")?;
    let item_name = ItemName::parse(&name)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid special name: {e}")))?;

    Ok(Special {
        id: row.try_get("id")?,
        item_name,
        category: row.try_get("category")?,
        price,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for daily specials.
pub struct SpecialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SpecialRepository<'a> {
    /// Create a new special repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a special by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SpecialId) -> Result<Option<Special>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, item_name, category, price, created_at FROM specials WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(map_special).transpose()
    }

    /// All current specials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Special>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, item_name, category, price, created_at FROM specials ORDER BY id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_special).collect()
    }

    /// Replace the current specials with a new one: sweep every existing row,
    /// then insert. Both statements run in one transaction so readers never
    /// see an empty board mid-swap.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails.
    pub async fn replace(
        &self,
        item_name: &ItemName,
        category: &str,
        price: Price,
    ) -> Result<SpecialId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM specials")
            .execute(&mut *tx)
            .await?;

        let result =
            sqlx::query("INSERT INTO specials (item_name, category, price) VALUES (?, ?, ?)")
                .bind(item_name.as_str())
                .bind(category)
                .bind(price.rupees())
                .execute(&mut *tx)
                .await?;

        let id = SpecialId::new(result.last_insert_rowid());
        tx.commit().await?;

        Ok(id)
    }
}
