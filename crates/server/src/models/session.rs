//! Session-related types.
//!
//! Types stored in the session for authentication state and the cart.

use serde::{Deserialize, Serialize};

use tandoori_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name, shown in the navigation bar.
    pub name: String,
    /// Whether this user may access the admin panel.
    pub is_admin: bool,
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the server-side cart.
    pub const CART: &str = "cart";
}
