//! Group and membership persistence.
//!
//! The formation helpers run inside the checkout transaction and take a
//! `&mut SqliteConnection`. Reads for pages go through [`GroupRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use tandoori_core::{GroupId, GroupName, ItemKind, ItemName, OrderId, UserId};

use super::RepositoryError;
use crate::models::group::{Group, GroupSummary};

fn map_group(row: &SqliteRow) -> Result<Group, RepositoryError> {
    Ok(Group {
        id: row.try_get("id")?,
        name: GroupName::from_stored(row.try_get("group_name")?),
    })
}

/// Distinct menu-kind item names on one order. Offer and special lines are
/// excluded: promotional purchases never seed or grow a group.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn distinct_menu_items_of_order(
    conn: &mut SqliteConnection,
    order_id: OrderId,
) -> Result<Vec<ItemName>, RepositoryError> {
    let rows = sqlx::query(
        r"
        SELECT DISTINCT item_name
        FROM order_items
        WHERE order_id = ? AND kind = ?
        ",
    )
    .bind(order_id)
    .bind(ItemKind::Menu.as_str())
    .fetch_all(&mut *conn)
    .await?;

    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("item_name")?;
        names.push(ItemName::parse(&name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid stored item name: {e}"))
        })?);
    }
    Ok(names)
}

/// Every distinct user who has ever ordered this exact item name as a
/// regular menu purchase, across all orders.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn distinct_buyers_of_item(
    conn: &mut SqliteConnection,
    item: &ItemName,
) -> Result<Vec<UserId>, RepositoryError> {
    let rows = sqlx::query(
        r"
        SELECT DISTINCT o.user_id
        FROM orders o
        JOIN order_items oi ON o.id = oi.order_id
        WHERE oi.item_name = ? AND oi.kind = ?
        ",
    )
    .bind(item.as_str())
    .bind(ItemKind::Menu.as_str())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|row| row.try_get::<UserId, _>("user_id").map_err(Into::into))
        .collect()
}

/// Resolve the group with this name, creating it if absent.
///
/// Atomic against concurrent checkouts qualifying the same item: the insert
/// relies on the unique constraint on `group_name`, and a unique violation
/// means someone else created the row first, so re-fetch it. The race is
/// recovered here and never surfaces to callers.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
/// Returns `RepositoryError::Conflict` if the group vanished between the
/// failed insert and the re-fetch (a concurrent delete).
pub async fn find_or_create(
    conn: &mut SqliteConnection,
    name: &GroupName,
) -> Result<GroupId, RepositoryError> {
    let inserted = sqlx::query("INSERT INTO groups (group_name) VALUES (?)")
        .bind(name.as_str())
        .execute(&mut *conn)
        .await;

    match inserted {
        Ok(result) => Ok(GroupId::new(result.last_insert_rowid())),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            let row = sqlx::query("SELECT id FROM groups WHERE group_name = ?")
                .bind(name.as_str())
                .fetch_optional(&mut *conn)
                .await?;

            row.map_or_else(
                || {
                    Err(RepositoryError::Conflict(format!(
                        "group '{name}' disappeared during find-or-create"
                    )))
                },
                |row| Ok(row.try_get::<GroupId, _>("id")?),
            )
        }
        Err(e) => Err(RepositoryError::Database(e)),
    }
}

/// Add a membership if absent. Re-adding an existing member is a no-op.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn add_member_if_absent(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    sqlx::query("INSERT OR IGNORE INTO group_members (group_id, user_id) VALUES (?, ?)")
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Repository for reading groups and memberships.
pub struct GroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GroupRepository<'a> {
    /// Create a new group repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a group by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: GroupId) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT id, group_name FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(map_group).transpose()
    }

    /// Get a group by its unique name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &GroupName) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT id, group_name FROM groups WHERE group_name = ?")
            .bind(name.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(map_group).transpose()
    }

    /// All groups, for the admin offer form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        let rows = sqlx::query("SELECT id, group_name FROM groups ORDER BY group_name ASC")
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(map_group).collect()
    }

    /// Groups the user belongs to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn groups_for_user(&self, user_id: UserId) -> Result<Vec<Group>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT g.id, g.group_name
            FROM groups g
            JOIN group_members gm ON g.id = gm.group_id
            WHERE gm.user_id = ?
            ORDER BY g.group_name ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_group).collect()
    }

    /// All groups with member counts, for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summaries(&self) -> Result<Vec<GroupSummary>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT g.id, g.group_name, COUNT(gm.user_id) AS member_count
            FROM groups g
            LEFT JOIN group_members gm ON g.id = gm.group_id
            GROUP BY g.id
            ORDER BY g.group_name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            summaries.push(GroupSummary {
                id: row.try_get("id")?,
                name: GroupName::from_stored(row.try_get("group_name")?),
                member_count: row.try_get("member_count")?,
            });
        }
        Ok(summaries)
    }

    /// Whether the user is a member of the group.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM group_members WHERE group_id = ? AND user_id = ?")
            .bind(group_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }
}
