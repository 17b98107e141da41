//! Cart route handlers.
//!
//! The cart lives in the session. Price and name are copied onto the line
//! when it is added, so a later menu edit doesn't reprice a cart behind the
//! user's back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use tandoori_core::{ItemKind, ItemName, MenuItemId, OfferId, SpecialId};

use crate::db::{GroupRepository, MenuRepository, OfferRepository, SpecialRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Cart, CurrentUser, session_keys};
use crate::state::AppState;

/// Load the cart from the session, defaulting to empty.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?
        .unwrap_or_default())
}

/// Write the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Clear the cart after checkout.
pub async fn clear_cart(session: &Session) -> Result<()> {
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(())
}

/// Add-to-cart form for a menu item.
#[derive(Deserialize)]
pub struct AddMenuItemForm {
    pub item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Add-to-cart form for an offer or special.
#[derive(Deserialize)]
pub struct AddByIdForm {
    pub id: i64,
}

/// Remove-line form.
#[derive(Deserialize)]
pub struct RemoveForm {
    pub key: String,
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub key: String,
    pub name: String,
    pub kind: &'static str,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub user: Option<CurrentUser>,
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub is_empty: bool,
}

/// Build the display lines and total for a cart, shared with checkout.
pub(crate) fn cart_views(cart: &Cart) -> (Vec<CartLineView>, String) {
    let lines = cart
        .entries()
        .map(|(key, line)| CartLineView {
            key: key.to_owned(),
            name: line.name.as_str().to_owned(),
            kind: line.kind.as_str(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_total: line.line_total().to_string(),
        })
        .collect();
    (lines, cart.total().to_string())
}

/// Display the cart.
pub async fn show(RequireAuth(user): RequireAuth, session: Session) -> Result<CartTemplate> {
    let cart = load_cart(&session).await?;
    let (lines, total) = cart_views(&cart);

    Ok(CartTemplate {
        user: Some(user),
        is_empty: cart.is_empty(),
        lines,
        total,
    })
}

/// Add a menu item to the cart.
pub async fn add_menu_item(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<AddMenuItemForm>,
) -> Result<Response> {
    let menu = MenuRepository::new(state.pool());
    let item = menu
        .get(MenuItemId::new(form.item_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.item_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(
        Cart::menu_key(item.id),
        item.item_name,
        ItemKind::Menu,
        item.price,
        form.quantity,
    );
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/menu").into_response())
}

/// Add a group offer to the cart.
///
/// Only members of the offer's group may add it, and only while it is
/// unexpired. The claim itself happens on the group page; adding to cart is
/// how a claimed offer is actually purchased.
pub async fn add_offer(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<AddByIdForm>,
) -> Result<Response> {
    let offers = OfferRepository::new(state.pool());
    let groups = GroupRepository::new(state.pool());

    let offer = offers
        .get(OfferId::new(form.id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("offer {}", form.id)))?;

    if !groups.is_member(offer.group_id, user.id).await? {
        return Err(AppError::Forbidden("not a member of this group".to_owned()));
    }
    if offer.is_expired(Utc::now()) {
        return Err(AppError::BadRequest("this offer has expired".to_owned()));
    }

    let name = ItemName::parse(&offer.title)
        .map_err(|e| AppError::Internal(format!("invalid offer title: {e}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add(Cart::offer_key(offer.id), name, ItemKind::Offer, offer.price, 1);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Add a daily special to the cart.
pub async fn add_special(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<AddByIdForm>,
) -> Result<Response> {
    let specials = SpecialRepository::new(state.pool());
    let special = specials
        .get(SpecialId::new(form.id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("special {}", form.id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(
        Cart::special_key(special.id),
        special.item_name,
        ItemKind::Special,
        special.price,
        1,
    );
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Remove a line from the cart.
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<RemoveForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&form.key);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tandoori_core::Price;

    #[test]
    fn test_cart_views_carry_keys_and_totals() {
        let mut cart = Cart::default();
        cart.add(
            Cart::menu_key(MenuItemId::new(3)),
            ItemName::parse("Garlic Naan").unwrap(),
            ItemKind::Menu,
            Price::from_rupees(60).unwrap(),
            4,
        );

        let (lines, total) = cart_views(&cart);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "menu_3");
        assert_eq!(lines[0].line_total, "₹240");
        assert_eq!(total, "₹240");
    }
}
