//! Admin panel route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::instrument;

use tandoori_core::{DietRequestId, DietStatus, GroupId, ItemName, Price};

use crate::db::{
    DietRepository, GroupRepository, MenuRepository, OfferRepository, SpecialRepository,
    SupplierRepository,
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::models::supplier::SupplierSort;
use crate::routes::diet::DietRequestView;
use crate::routes::suppliers::ListingView;
use crate::state::AppState;

/// The datetime-local input format used by the offer form.
const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Offer creation form fields.
#[derive(Deserialize)]
pub struct OfferForm {
    pub group_id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    /// Expiry instant, `YYYY-MM-DDTHH:MM`, interpreted as UTC.
    pub expires_at: String,
    pub max_claims: i64,
}

/// Special creation form fields.
#[derive(Deserialize)]
pub struct SpecialForm {
    pub item_name: String,
    pub category: String,
    pub price: i64,
}

/// Supplier browse query parameters.
#[derive(Deserialize, Default)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Diet decision form fields.
#[derive(Deserialize)]
pub struct DietStatusForm {
    /// "accept" or "reject".
    pub decision: String,
}

/// A group option for the offer form, with its size.
#[derive(Clone)]
pub struct GroupOptionView {
    pub id: i64,
    pub name: String,
    pub member_count: i64,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
    pub groups: Vec<GroupOptionView>,
    pub menu_count: i64,
}

/// Supplier browser template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/suppliers.html")]
pub struct SupplierBrowserTemplate {
    pub user: Option<CurrentUser>,
    pub listings: Vec<AdminListingView>,
    pub categories: Vec<String>,
    pub category: String,
    pub sort_low: bool,
}

/// A listing with its supplier's name.
#[derive(Clone)]
pub struct AdminListingView {
    pub supplier: String,
    pub listing: ListingView,
}

/// Diet review queue template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/diet.html")]
pub struct DietQueueTemplate {
    pub user: Option<CurrentUser>,
    pub requests: Vec<DietRequestView>,
}

/// Display the dashboard: every group with its size, and the offer and
/// special forms.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> Result<DashboardTemplate> {
    let groups = GroupRepository::new(state.pool());
    let menu = MenuRepository::new(state.pool());

    let summaries = groups.summaries().await?;

    Ok(DashboardTemplate {
        user: Some(user),
        groups: summaries
            .iter()
            .map(|summary| GroupOptionView {
                id: summary.id.as_i64(),
                name: summary.name.as_str().to_owned(),
                member_count: summary.member_count,
            })
            .collect(),
        menu_count: menu.count().await?,
    })
}

/// Post an offer to a group.
#[instrument(skip_all, fields(group_id = form.group_id))]
pub async fn post_offer(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<OfferForm>,
) -> Result<Response> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title must not be blank".to_owned()));
    }
    let price = Price::from_rupees(form.price)
        .ok_or_else(|| AppError::BadRequest("price must not be negative".to_owned()))?;
    if form.max_claims < 1 {
        return Err(AppError::BadRequest(
            "max claims must be at least 1".to_owned(),
        ));
    }

    let expires_at = NaiveDateTime::parse_from_str(&form.expires_at, EXPIRY_FORMAT)
        .map_err(|_| AppError::BadRequest("invalid expiry timestamp".to_owned()))?
        .and_utc();

    let group_id = GroupId::new(form.group_id);
    let groups = GroupRepository::new(state.pool());
    if groups.get(group_id).await?.is_none() {
        return Err(AppError::NotFound(format!("group {}", form.group_id)));
    }

    let offers = OfferRepository::new(state.pool());
    let offer_id = offers
        .create(
            group_id,
            title,
            form.description.trim(),
            price,
            expires_at,
            form.max_claims,
        )
        .await?;

    tracing::info!(%offer_id, %group_id, "offer posted");

    Ok(Redirect::to("/admin").into_response())
}

/// Post today's special, sweeping the previous ones.
pub async fn post_special(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<SpecialForm>,
) -> Result<Response> {
    let item_name =
        ItemName::parse(&form.item_name).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let price = Price::from_rupees(form.price)
        .ok_or_else(|| AppError::BadRequest("price must not be negative".to_owned()))?;

    let specials = SpecialRepository::new(state.pool());
    specials
        .replace(&item_name, form.category.trim(), price)
        .await?;

    Ok(Redirect::to("/admin").into_response())
}

/// Browse supplier listings with optional category filter and sort.
pub async fn browse_suppliers(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<BrowseQuery>,
) -> Result<SupplierBrowserTemplate> {
    let suppliers = SupplierRepository::new(state.pool());

    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    let sort = SupplierSort::from_query(query.sort.as_deref());

    let listings = suppliers.browse(category, sort).await?;
    let categories = suppliers.categories().await?;

    Ok(SupplierBrowserTemplate {
        user: Some(user),
        listings: listings
            .iter()
            .map(|listing| AdminListingView {
                supplier: listing.supplier_name.clone(),
                listing: ListingView::from(&listing.item),
            })
            .collect(),
        categories,
        category: category.unwrap_or_default().to_owned(),
        sort_low: sort == SupplierSort::PriceLowToHigh,
    })
}

/// Display the diet request review queue.
pub async fn diet_queue(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> Result<DietQueueTemplate> {
    let diet = DietRepository::new(state.pool());
    let requests = diet.list_all().await?;

    Ok(DietQueueTemplate {
        user: Some(user),
        requests: requests.iter().map(DietRequestView::from).collect(),
    })
}

/// Accept or reject a diet request.
#[instrument(skip_all, fields(request_id = id, decision = %form.decision))]
pub async fn set_diet_status(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<DietStatusForm>,
) -> Result<Response> {
    let status = match form.decision.as_str() {
        "accept" => DietStatus::Accepted,
        "reject" => DietStatus::Rejected,
        other => {
            return Err(AppError::BadRequest(format!("unknown decision: {other}")));
        }
    };

    let diet = DietRepository::new(state.pool());
    diet.set_status(DietRequestId::new(id), status).await?;

    Ok(Redirect::to("/admin/diet").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_browser_marks_active_category() {
        let template = SupplierBrowserTemplate {
            user: None,
            listings: Vec::new(),
            categories: vec!["Dairy".to_owned(), "Spices".to_owned()],
            category: "Spices".to_owned(),
            sort_low: false,
        };

        let html = template.render().unwrap();
        assert!(html.contains(r#"value="Spices" selected"#));
        assert!(!html.contains(r#"value="Dairy" selected"#));
    }
}
