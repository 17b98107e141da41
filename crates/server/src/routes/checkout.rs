//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::cart::{CartLineView, cart_views, clear_cart, load_cart};
use crate::services::CheckoutService;
use crate::services::checkout::CheckoutError;
use crate::state::AppState;

/// Payment methods offered at checkout. Payment is simulated; the choice is
/// recorded on the order and nothing is charged.
const PAYMENT_METHODS: &[&str] = &["cash", "card", "upi"];

/// Checkout form fields.
#[derive(Deserialize)]
pub struct CheckoutForm {
    pub payment_method: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub user: Option<CurrentUser>,
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub payment_methods: &'static [&'static str],
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct OrderSuccessTemplate {
    pub user: Option<CurrentUser>,
    pub order_id: i64,
    pub total: String,
    pub groups_joined: Vec<GroupJoinedView>,
}

/// A group placement to announce on the confirmation page.
#[derive(Clone)]
pub struct GroupJoinedView {
    pub id: i64,
    pub name: String,
}

/// Display the checkout page.
pub async fn show(RequireAuth(user): RequireAuth, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let (lines, total) = cart_views(&cart);

    Ok(CheckoutTemplate {
        user: Some(user),
        lines,
        total,
        payment_methods: PAYMENT_METHODS,
    }
    .into_response())
}

/// Place the order.
///
/// Runs the checkout transaction (order, lines, group formation) and clears
/// the session cart only after it commits.
#[instrument(skip_all, fields(payment_method = %form.payment_method))]
pub async fn place_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    if !PAYMENT_METHODS.contains(&form.payment_method.as_str()) {
        return Err(crate::error::AppError::BadRequest(
            "unknown payment method".to_owned(),
        ));
    }

    let cart = load_cart(&session).await?;
    let checkout = CheckoutService::new(state.pool());

    let receipt = match checkout
        .place_order(user.id, &cart, &form.payment_method)
        .await
    {
        Ok(receipt) => receipt,
        Err(CheckoutError::EmptyCart) => return Ok(Redirect::to("/cart").into_response()),
        Err(e) => return Err(e.into()),
    };

    clear_cart(&session).await?;

    tracing::info!(
        order_id = %receipt.order_id,
        groups = receipt.groups_joined.len(),
        "order placed"
    );

    Ok(OrderSuccessTemplate {
        user: Some(user),
        order_id: receipt.order_id.as_i64(),
        total: receipt.total.to_string(),
        groups_joined: receipt
            .groups_joined
            .iter()
            .map(|g| GroupJoinedView {
                id: g.id.as_i64(),
                name: g.name.as_str().to_owned(),
            })
            .collect(),
    }
    .into_response())
}
