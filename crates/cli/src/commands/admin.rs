//! Admin user management commands.

use tandoori_core::Email;
use tandoori_server::db::UserRepository;
use tandoori_server::services::auth;

use super::{CommandError, connect};

/// Create an admin user.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` if the email or name is invalid,
/// or a repository error if the email is already taken.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<(), CommandError> {
    let email =
        Email::parse(email).map_err(|e| CommandError::InvalidInput(format!("email: {e}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidInput("name must not be blank".into()));
    }

    let password_hash = auth::hash_password(password)?;

    let pool = connect().await?;
    let users = UserRepository::new(&pool);
    let user = users.create(name, &email, &password_hash, true).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin user created");

    Ok(())
}
