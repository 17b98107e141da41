//! Offer persistence, including the conditional claim increment.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{GroupId, OfferId, Price};

use super::RepositoryError;
use crate::models::offer::Offer;

fn map_offer(row: &SqliteRow) -> Result<Offer, RepositoryError> {
    let price_rupees: i64 = row.try_get("price")?;
    let price = Price::from_rupees(price_rupees).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("negative offer price: {price_rupees}"))
    })?;

    Ok(Offer {
        id: row.try_get("id")?,
        group_id: row.try_get("group_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price,
        expires_at: row.try_get::<DateTime<Utc>, _>("expires_at")?,
        max_claims: row.try_get("max_claims")?,
        claimed_count: row.try_get("claimed_count")?,
    })
}

const OFFER_COLUMNS: &str =
    "id, group_id, title, description, price, expires_at, max_claims, claimed_count";

/// Repository for offers.
pub struct OfferRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OfferRepository<'a> {
    /// Create a new offer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an offer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OfferId) -> Result<Option<Offer>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(map_offer).transpose()
    }

    /// All offers posted to a group, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_group(&self, group_id: GroupId) -> Result<Vec<Offer>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE group_id = ? ORDER BY id DESC"
        ))
        .bind(group_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_offer).collect()
    }

    /// Create an offer with zero claims.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        group_id: GroupId,
        title: &str,
        description: &str,
        price: Price,
        expires_at: DateTime<Utc>,
        max_claims: i64,
    ) -> Result<OfferId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO offers (group_id, title, description, price, expires_at, max_claims, claimed_count)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            ",
        )
        .bind(group_id)
        .bind(title)
        .bind(description)
        .bind(price.rupees())
        .bind(expires_at)
        .bind(max_claims)
        .execute(self.pool)
        .await?;

        Ok(OfferId::new(result.last_insert_rowid()))
    }

    /// Take one claim slot if any remain. The guard and the increment are a
    /// single statement, so two racing claimants for the last slot resolve
    /// at the database: exactly one update matches a row.
    ///
    /// Returns `true` if a slot was taken, `false` if the offer was already
    /// fully claimed (or does not exist).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn try_increment_claims(&self, id: OfferId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE offers
            SET claimed_count = claimed_count + 1
            WHERE id = ? AND claimed_count < max_claims
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
