//! Domain models shared between repositories, services, and routes.

pub mod cart;
pub mod diet;
pub mod group;
pub mod offer;
pub mod order;
pub mod session;
pub mod special;
pub mod supplier;
pub mod user;

pub use cart::{Cart, CartLine};
pub use session::{CurrentUser, keys as session_keys};
