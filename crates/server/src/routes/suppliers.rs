//! Supplier listing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use tandoori_core::{ItemName, Price};

use crate::db::SupplierRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::models::supplier::SupplierItem;
use crate::state::AppState;

/// Publish-listing form fields.
#[derive(Deserialize)]
pub struct PublishForm {
    pub item_name: String,
    pub category: String,
    pub price_per_kg: i64,
    pub quantity: String,
    pub location: String,
    pub contact: String,
}

/// A listing for display.
#[derive(Clone)]
pub struct ListingView {
    pub name: String,
    pub category: String,
    pub price_per_kg: String,
    pub quantity: String,
    pub location: String,
    pub contact: String,
    pub posted_at: String,
}

impl From<&SupplierItem> for ListingView {
    fn from(item: &SupplierItem) -> Self {
        Self {
            name: item.item_name.as_str().to_owned(),
            category: item.category.clone(),
            price_per_kg: format!("{}/kg", item.price_per_kg),
            quantity: item.quantity.clone(),
            location: item.location.clone(),
            contact: item.contact.clone(),
            posted_at: item.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// My-listings page template.
#[derive(Template, WebTemplate)]
#[template(path = "suppliers/mine.html")]
pub struct MyListingsTemplate {
    pub user: Option<CurrentUser>,
    pub listings: Vec<ListingView>,
}

/// Display the user's own listings and the publish form.
pub async fn mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<MyListingsTemplate> {
    let suppliers = SupplierRepository::new(state.pool());
    let listings = suppliers.for_user(user.id).await?;

    Ok(MyListingsTemplate {
        user: Some(user),
        listings: listings.iter().map(ListingView::from).collect(),
    })
}

/// Publish a new listing.
pub async fn publish(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PublishForm>,
) -> Result<Response> {
    let item_name = ItemName::parse(&form.item_name)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let price = Price::from_rupees(form.price_per_kg)
        .ok_or_else(|| AppError::BadRequest("price must not be negative".to_owned()))?;

    let category = form.category.trim();
    if category.is_empty() {
        return Err(AppError::BadRequest("category must not be blank".to_owned()));
    }

    let suppliers = SupplierRepository::new(state.pool());
    suppliers
        .create(
            user.id,
            &item_name,
            category,
            price,
            form.quantity.trim(),
            form.location.trim(),
            form.contact.trim(),
        )
        .await?;

    Ok(Redirect::to("/suppliers").into_response())
}
