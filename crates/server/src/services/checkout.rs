//! Checkout: turn a session cart into a persisted order.

use sqlx::SqlitePool;
use thiserror::Error;

use tandoori_core::{OrderId, Price, UserId};

use crate::db::{RepositoryError, orders};
use crate::models::cart::Cart;
use crate::models::group::Group;
use crate::services::groups::form_groups_for_order;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Placing an order with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Transaction error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What the checkout produced, for the confirmation page.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// The new order's ID.
    pub order_id: OrderId,
    /// Cart total charged (simulated).
    pub total: Price,
    /// Groups the buyer now belongs to because of this order.
    pub groups_joined: Vec<Group>,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order from the cart and run group formation over it.
    ///
    /// One transaction covers the order row, its lines, and all group
    /// placements; a failure anywhere leaves no partial order behind.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    /// Returns `CheckoutError::Repository` or `CheckoutError::Database` if
    /// persistence fails.
    pub async fn place_order(
        &self,
        user_id: UserId,
        cart: &Cart,
        payment_method: &str,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut tx = self.pool.begin().await?;

        let order_id = orders::insert_order(&mut tx, user_id, payment_method).await?;
        for line in cart.lines() {
            orders::insert_order_item(&mut tx, order_id, line).await?;
        }

        let groups_joined = form_groups_for_order(&mut tx, order_id).await?;

        tx.commit().await?;

        Ok(CheckoutReceipt {
            order_id,
            total: cart.total(),
            groups_joined,
        })
    }
}
