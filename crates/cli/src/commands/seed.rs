//! Seed command: starter menu plus a default admin account.

use tandoori_core::{Email, ItemName, Price};
use tandoori_server::db::{MenuRepository, RepositoryError, UserRepository};
use tandoori_server::services::auth;

use super::{CommandError, connect};

/// Default admin account created by `seed`. The password is for local
/// development only; use `admin create` for anything real.
const ADMIN_EMAIL: &str = "admin@tandoori.local";
const ADMIN_NAME: &str = "Admin";
const ADMIN_PASSWORD: &str = "tandoori-admin";

/// Starter menu: (name, category, price in rupees).
const STARTER_MENU: &[(&str, &str, i64)] = &[
    ("Butter Chicken", "Mains", 320),
    ("Paneer Tikka", "Starters", 240),
    ("Veg Biryani", "Mains", 180),
    ("Garlic Naan", "Breads", 60),
    ("Gulab Jamun", "Desserts", 90),
];

/// Seed the database. Idempotent: an already-seeded menu and an existing
/// admin account are both left alone.
///
/// # Errors
///
/// Returns `CommandError` if the connection or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let menu = MenuRepository::new(&pool);
    if menu.count().await? == 0 {
        for &(name, category, rupees) in STARTER_MENU {
            let item_name = ItemName::parse(name)
                .map_err(|e| CommandError::InvalidInput(format!("menu item: {e}")))?;
            let price = Price::from_rupees(rupees)
                .ok_or_else(|| CommandError::InvalidInput("negative seed price".into()))?;
            menu.insert(&item_name, category, price).await?;
        }
        tracing::info!(items = STARTER_MENU.len(), "menu seeded");
    } else {
        tracing::info!("menu already seeded, skipping");
    }

    let email = Email::parse(ADMIN_EMAIL)
        .map_err(|e| CommandError::InvalidInput(format!("admin email: {e}")))?;
    let password_hash = auth::hash_password(ADMIN_PASSWORD)?;

    let users = UserRepository::new(&pool);
    match users.create(ADMIN_NAME, &email, &password_hash, true).await {
        Ok(user) => tracing::info!(user_id = %user.id, "default admin created"),
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!("admin account already exists, skipping");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
