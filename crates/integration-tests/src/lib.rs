//! Integration test harness for Tandoori Table.
//!
//! Tests run against a fresh in-memory `SQLite` database per test. The pool
//! is capped at one connection: each in-memory connection is its own
//! database, so a second connection would see an empty schema.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tandoori-integration-tests
//! ```

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use tandoori_core::{Email, GroupId, ItemKind, ItemName, MenuItemId, OfferId, Price, UserId};
use tandoori_server::db::{self, MenuRepository, OfferRepository, UserRepository};
use tandoori_server::models::Cart;
use tandoori_server::models::user::User;
use tandoori_server::services::CheckoutService;
use tandoori_server::services::checkout::CheckoutReceipt;

/// A fresh database with the full schema and helpers for setting up state.
pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    /// Create a fresh in-memory database and run the migrations.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or migrated.
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true);

        // One connection only: each in-memory connection is a separate DB.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .expect("in-memory database");

        db::run_migrations(&pool).await.expect("migrations");

        Self { pool }
    }

    /// Create a user. The password hash is a placeholder; these tests never
    /// log in through the auth service.
    pub async fn create_user(&self, name: &str, email: &str) -> User {
        let email = Email::parse(email).expect("valid email");
        UserRepository::new(&self.pool)
            .create(name, &email, "unused-hash", false)
            .await
            .expect("create user")
    }

    /// Put an item on the menu.
    pub async fn add_menu_item(&self, name: &str, rupees: i64) -> MenuItemId {
        let item_name = ItemName::parse(name).expect("valid item name");
        let price = Price::from_rupees(rupees).expect("non-negative price");
        MenuRepository::new(&self.pool)
            .insert(&item_name, "Test", price)
            .await
            .expect("insert menu item")
    }

    /// Build a cart of regular menu lines: (name, price in rupees, quantity).
    pub fn menu_cart(items: &[(&str, i64, u32)]) -> Cart {
        let mut cart = Cart::default();
        for (i, &(name, rupees, quantity)) in items.iter().enumerate() {
            cart.add(
                format!("menu_{i}"),
                ItemName::parse(name).expect("valid item name"),
                ItemKind::Menu,
                Price::from_rupees(rupees).expect("non-negative price"),
                quantity,
            );
        }
        cart
    }

    /// Place an order of regular menu lines for a user.
    pub async fn order_menu_items(
        &self,
        user_id: UserId,
        items: &[(&str, i64, u32)],
    ) -> CheckoutReceipt {
        let cart = Self::menu_cart(items);
        CheckoutService::new(&self.pool)
            .place_order(user_id, &cart, "cash")
            .await
            .expect("place order")
    }

    /// Create a group directly and enroll the given users.
    pub async fn create_group_with_members(&self, item: &str, members: &[UserId]) -> GroupId {
        let name = tandoori_core::GroupName::for_item(&ItemName::parse(item).expect("valid name"));
        let mut conn = self.pool.acquire().await.expect("acquire");
        let group_id = db::groups::find_or_create(&mut conn, &name)
            .await
            .expect("create group");
        for &user_id in members {
            db::groups::add_member_if_absent(&mut conn, group_id, user_id)
                .await
                .expect("add member");
        }
        group_id
    }

    /// Post an offer to a group.
    pub async fn create_offer(
        &self,
        group_id: GroupId,
        title: &str,
        expires_at: DateTime<Utc>,
        max_claims: i64,
    ) -> OfferId {
        OfferRepository::new(&self.pool)
            .create(
                group_id,
                title,
                "test offer",
                Price::from_rupees(99).expect("non-negative price"),
                expires_at,
                max_claims,
            )
            .await
            .expect("create offer")
    }

    /// An expiry comfortably in the future.
    #[must_use]
    pub fn future_expiry() -> DateTime<Utc> {
        Utc::now() + TimeDelta::hours(6)
    }
}
