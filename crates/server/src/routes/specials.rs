//! Daily specials route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::SpecialRepository;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::models::special::Special;
use crate::state::AppState;

/// A special for display.
#[derive(Clone)]
pub struct SpecialView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
    pub posted_at: String,
}

impl From<&Special> for SpecialView {
    fn from(special: &Special) -> Self {
        Self {
            id: special.id.as_i64(),
            name: special.item_name.as_str().to_owned(),
            category: special.category.clone(),
            price: special.price.to_string(),
            posted_at: special.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Specials page template.
#[derive(Template, WebTemplate)]
#[template(path = "specials/show.html")]
pub struct SpecialsTemplate {
    pub user: Option<CurrentUser>,
    pub specials: Vec<SpecialView>,
}

/// Display the current specials.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<SpecialsTemplate> {
    let specials = SpecialRepository::new(state.pool());
    let current = specials.list().await?;

    Ok(SpecialsTemplate {
        user,
        specials: current.iter().map(SpecialView::from).collect(),
    })
}
