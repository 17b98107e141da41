//! Diet menu request persistence.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{DietRequestId, DietStatus, UserId};

use super::RepositoryError;
use crate::models::diet::DietRequest;

const DIET_COLUMNS: &str = "id, user_id, name, shift, mobile, days, months, \
                            liquids, nonveg, food_items, status, created_at";

fn map_request(row: &SqliteRow) -> Result<DietRequest, RepositoryError> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<DietStatus>()
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

    Ok(DietRequest {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        shift: row.try_get("shift")?,
        mobile: row.try_get("mobile")?,
        days: row.try_get("days")?,
        months: row.try_get("months")?,
        liquids: row.try_get("liquids")?,
        nonveg: row.try_get("nonveg")?,
        food_items: row.try_get("food_items")?,
        status,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Form payload for a new diet request.
#[derive(Debug, Clone)]
pub struct NewDietRequest {
    pub name: String,
    pub shift: String,
    pub mobile: String,
    pub days: String,
    pub months: String,
    pub liquids: String,
    pub nonveg: String,
    pub food_items: String,
}

/// Repository for diet menu requests.
pub struct DietRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DietRepository<'a> {
    /// Create a new diet repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit a request. New requests always start pending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        request: &NewDietRequest,
    ) -> Result<DietRequestId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO diet_menu_requests
                (user_id, name, shift, mobile, days, months, liquids, nonveg, food_items, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.shift)
        .bind(&request.mobile)
        .bind(&request.days)
        .bind(&request.months)
        .bind(&request.liquids)
        .bind(&request.nonveg)
        .bind(&request.food_items)
        .bind(DietStatus::Pending.as_str())
        .execute(self.pool)
        .await?;

        Ok(DietRequestId::new(result.last_insert_rowid()))
    }

    /// A request by ID, only if it belongs to the user. Used for the plan
    /// download, where ownership gates access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: DietRequestId,
        user_id: UserId,
    ) -> Result<Option<DietRequest>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_menu_requests WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(map_request).transpose()
    }

    /// The user's own requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<DietRequest>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_menu_requests WHERE user_id = ? ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_request).collect()
    }

    /// All requests, newest first, for the admin review queue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<DietRequest>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_menu_requests ORDER BY id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_request).collect()
    }

    /// Record the admin's decision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    /// Returns `RepositoryError::NotFound` if no request has this ID.
    pub async fn set_status(
        &self,
        id: DietRequestId,
        status: DietStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE diet_menu_requests SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
