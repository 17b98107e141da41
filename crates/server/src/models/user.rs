//! User model.

use chrono::{DateTime, Utc};

use tandoori_core::{Email, UserId};

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Whether this user may access the admin panel.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
