//! Supplier listing persistence.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{ItemName, Price, SupplierItemId, UserId};

use super::RepositoryError;
use crate::models::supplier::{SupplierItem, SupplierListing, SupplierSort};

fn map_item(row: &SqliteRow) -> Result<SupplierItem, RepositoryError> {
    let price_rupees: i64 = row.try_get("price_per_kg")?;
    let price_per_kg = Price::from_rupees(price_rupees).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("negative supplier price: {price_rupees}"))
    })?;

    let name: String = row.try_get("item_name")?;
    let item_name = ItemName::parse(&name)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid supplier item: {e}")))?;

    Ok(SupplierItem {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        item_name,
        category: row.try_get("category")?,
        price_per_kg,
        quantity: row.try_get("quantity")?,
        location: row.try_get("location")?,
        contact: row.try_get("contact")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for supplier listings.
pub struct SupplierRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SupplierRepository<'a> {
    /// Create a new supplier repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Publish a listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: UserId,
        item_name: &ItemName,
        category: &str,
        price_per_kg: Price,
        quantity: &str,
        location: &str,
        contact: &str,
    ) -> Result<SupplierItemId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO supplier_items
                (user_id, item_name, category, price_per_kg, quantity, location, contact)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user_id)
        .bind(item_name.as_str())
        .bind(category)
        .bind(price_per_kg.rupees())
        .bind(quantity)
        .bind(location)
        .bind(contact)
        .execute(self.pool)
        .await?;

        Ok(SupplierItemId::new(result.last_insert_rowid()))
    }

    /// The user's own listings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<SupplierItem>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, item_name, category, price_per_kg, quantity,
                   location, contact, created_at
            FROM supplier_items
            WHERE user_id = ?
            ORDER BY id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_item).collect()
    }

    /// Browse all listings for the admin, optionally filtered to a category,
    /// in the requested sort order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn browse(
        &self,
        category: Option<&str>,
        sort: SupplierSort,
    ) -> Result<Vec<SupplierListing>, RepositoryError> {
        let order_by = match sort {
            SupplierSort::Newest => "s.id DESC",
            SupplierSort::PriceLowToHigh => "s.price_per_kg ASC, s.id DESC",
        };

        let base = format!(
            r"
            SELECT s.id, s.user_id, s.item_name, s.category, s.price_per_kg,
                   s.quantity, s.location, s.contact, s.created_at,
                   u.name AS supplier_name
            FROM supplier_items s
            JOIN users u ON u.id = s.user_id
            {}
            ORDER BY {order_by}
            ",
            if category.is_some() {
                "WHERE s.category = ?"
            } else {
                ""
            },
        );

        let mut query = sqlx::query(&base);
        if let Some(category) = category {
            query = query.bind(category);
        }
        let rows = query.fetch_all(self.pool).await?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in &rows {
            listings.push(SupplierListing {
                supplier_name: row.try_get("supplier_name")?,
                item: map_item(row)?,
            });
        }
        Ok(listings)
    }

    /// Distinct categories across all listings, for the filter dropdown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows =
            sqlx::query("SELECT DISTINCT category FROM supplier_items ORDER BY category ASC")
                .fetch_all(self.pool)
                .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("category").map_err(Into::into))
            .collect()
    }
}
