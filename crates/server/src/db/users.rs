//! User repository for database operations.
//!
//! All queries use the dynamic sqlx API with explicit row mapping; invalid
//! stored data surfaces as `RepositoryError::DataCorruption` rather than a
//! panic.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tandoori_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

fn map_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    let email: String = row.try_get("email")?;
    let email = Email::parse(&email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email,
        is_admin: row.try_get("is_admin")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO users (name, email, password_hash, is_admin, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(is_admin)
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            name: name.to_owned(),
            email: email.clone(),
            is_admin,
            created_at,
        })
    }

    /// Get a user together with their password hash, by email.
    ///
    /// Returns `None` if no user has that email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at, password_hash
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = map_user(&row)?;
        let password_hash: String = row.try_get("password_hash")?;
        Ok(Some((user, password_hash)))
    }

    /// Display names of all members of a group, for the my-groups page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn member_names(
        &self,
        group_id: tandoori_core::GroupId,
    ) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT u.name
            FROM users u
            JOIN group_members gm ON u.id = gm.user_id
            WHERE gm.group_id = ?
            ORDER BY u.name ASC
            ",
        )
        .bind(group_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(Into::into))
            .collect()
    }
}
