//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to menu
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Menu
//! GET  /menu                   - Menu listing (optional ?q= search)
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /cart/add/menu          - Add a menu item
//! POST /cart/add/offer         - Add a claimed group offer
//! POST /cart/add/special       - Add a daily special
//! POST /cart/remove            - Remove a line
//!
//! # Checkout (requires auth)
//! GET  /checkout               - Payment page
//! POST /checkout               - Place the order, form groups
//! GET  /orders                 - Order history
//!
//! # Groups and offers (requires auth)
//! GET  /groups                 - My groups
//! GET  /groups/{id}            - Group page with its offers (members only)
//! POST /offers/{id}/claim      - Claim an offer slot
//!
//! # Specials and suppliers
//! GET  /specials               - Current daily specials
//! GET  /suppliers              - My ingredient listings + publish form (requires auth)
//! POST /suppliers              - Publish a listing (requires auth)
//!
//! # Diet menu (requires auth)
//! GET  /diet                   - Request form + my requests
//! POST /diet                   - Submit a request
//! GET  /diet/{id}/download     - Download an accepted plan as text
//!
//! # Admin (requires admin)
//! GET  /admin                  - Dashboard (groups, counts)
//! POST /admin/offers           - Post an offer to a group
//! POST /admin/specials         - Post today's special
//! GET  /admin/suppliers        - Browse supplier listings (?category=, ?sort=low)
//! GET  /admin/diet             - Diet request review queue
//! POST /admin/diet/{id}/status - Accept or reject a request
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod diet;
pub mod groups;
pub mod menu;
pub mod offers;
pub mod orders;
pub mod specials;
pub mod suppliers;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/menu", post(cart::add_menu_item))
        .route("/add/offer", post(cart::add_offer))
        .route("/add/special", post(cart::add_special))
        .route("/remove", post(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/offers", post(admin::post_offer))
        .route("/specials", post(admin::post_special))
        .route("/suppliers", get(admin::browse_suppliers))
        .route("/diet", get(admin::diet_queue))
        .route("/diet/{id}/status", post(admin::set_diet_status))
}

/// Create the full application router. Health endpoints and the middleware
/// stack are added by the binary.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/menu") }))
        .route("/menu", get(menu::show))
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/orders", get(orders::history))
        .route("/groups", get(groups::my_groups))
        .route("/groups/{id}", get(groups::show))
        .route("/offers/{id}/claim", post(offers::claim))
        .route("/specials", get(specials::show))
        .route("/suppliers", get(suppliers::mine).post(suppliers::publish))
        .route("/diet", get(diet::form).post(diet::submit))
        .route("/diet/{id}/download", get(diet::download))
        .nest("/cart", cart_routes())
        .nest("/admin", admin_routes())
        .merge(auth_routes())
}
