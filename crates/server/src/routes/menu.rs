//! Menu route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::db::MenuRepository;
use crate::db::menu::MenuItem;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Menu search query.
#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.item_name.as_str().to_owned(),
            category: item.category.clone(),
            price: item.price.to_string(),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/show.html")]
pub struct MenuTemplate {
    pub user: Option<CurrentUser>,
    pub items: Vec<MenuItemView>,
    pub query: String,
}

/// Display the menu, optionally filtered by a search term.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<SearchQuery>,
) -> Result<MenuTemplate> {
    let menu = MenuRepository::new(state.pool());

    let term = query.q.unwrap_or_default();
    let items = if term.trim().is_empty() {
        menu.list().await?
    } else {
        menu.search(term.trim()).await?
    };

    Ok(MenuTemplate {
        user,
        items: items.iter().map(MenuItemView::from).collect(),
        query: term,
    })
}
