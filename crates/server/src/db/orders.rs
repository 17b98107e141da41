//! Order and order-line persistence.
//!
//! Order creation happens inside the checkout transaction, so the insert
//! helpers take a `&mut SqliteConnection` and join whatever transaction the
//! caller has open. Reads go through [`OrderRepository`] on the pool.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqliteConnection, SqlitePool};

use tandoori_core::{ItemKind, ItemName, OrderId, Price, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;
use crate::models::order::{HistoryLine, Order, OrderWithItems};

/// Insert the order row itself. Part of the checkout transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order(
    conn: &mut SqliteConnection,
    user_id: UserId,
    payment_method: &str,
) -> Result<OrderId, RepositoryError> {
    let result = sqlx::query(
        r"
        INSERT INTO orders (user_id, payment_method, created_at)
        VALUES (?, ?, ?)
        ",
    )
    .bind(user_id)
    .bind(payment_method)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    Ok(OrderId::new(result.last_insert_rowid()))
}

/// Insert one order line. Part of the checkout transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order_item(
    conn: &mut SqliteConnection,
    order_id: OrderId,
    line: &CartLine,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO order_items (order_id, item_name, kind, quantity)
        VALUES (?, ?, ?, ?)
        ",
    )
    .bind(order_id)
    .bind(line.name.as_str())
    .bind(line.kind.as_str())
    .bind(i64::from(line.quantity))
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Repository for reading order history.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All orders for a user, newest first, each with its lines joined back
    /// to the current menu for a best-effort price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored lines are invalid.
    pub async fn history_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let order_rows = sqlx::query(
            r"
            SELECT id, user_id, payment_method, created_at
            FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut history = Vec::with_capacity(order_rows.len());
        for row in order_rows {
            let order = Order {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                payment_method: row.try_get("payment_method")?,
                created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            };

            let lines = self.lines_for_order(order.id).await?;
            let total = lines.iter().fold(Price::default(), |acc, line| {
                line.price
                    .map_or(acc, |price| acc.plus(price.times(line.quantity)))
            });

            history.push(OrderWithItems {
                order,
                lines,
                total,
            });
        }

        Ok(history)
    }

    async fn lines_for_order(&self, order_id: OrderId) -> Result<Vec<HistoryLine>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT oi.item_name, oi.kind, oi.quantity, m.price AS menu_price
            FROM order_items oi
            LEFT JOIN menu m ON oi.item_name = m.item_name
            WHERE oi.order_id = ?
            ORDER BY oi.id ASC
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("item_name")?;
            let item_name = ItemName::parse(&name).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid stored item name: {e}"))
            })?;

            let kind: String = row.try_get("kind")?;
            let kind: ItemKind = kind.parse().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid order line kind: {e}"))
            })?;

            let quantity: i64 = row.try_get("quantity")?;
            let quantity = u32::try_from(quantity).map_err(|_| {
                RepositoryError::DataCorruption("negative order line quantity".to_owned())
            })?;

            let price = row
                .try_get::<Option<i64>, _>("menu_price")?
                .and_then(Price::from_rupees);

            lines.push(HistoryLine {
                item_name,
                kind,
                quantity,
                price,
            });
        }

        Ok(lines)
    }
}
