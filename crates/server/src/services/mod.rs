//! Business logic, between the routes and the repositories.

pub mod auth;
pub mod checkout;
pub mod groups;
pub mod offers;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutService};
pub use offers::{ClaimError, ClaimOutcome, OfferService};
