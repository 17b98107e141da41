//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::models::order::OrderWithItems;
use crate::state::AppState;

/// One historical order for display.
#[derive(Clone)]
pub struct OrderView {
    pub id: i64,
    pub placed_at: String,
    pub payment_method: String,
    pub total: String,
    pub lines: Vec<OrderLineView>,
}

/// One line of a historical order for display.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub kind: &'static str,
    pub quantity: u32,
    /// Empty when the item is no longer on the menu.
    pub price: String,
}

impl From<&OrderWithItems> for OrderView {
    fn from(order: &OrderWithItems) -> Self {
        Self {
            id: order.order.id.as_i64(),
            placed_at: order.order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            payment_method: order.order.payment_method.clone(),
            total: order.total.to_string(),
            lines: order
                .lines
                .iter()
                .map(|line| OrderLineView {
                    name: line.item_name.as_str().to_owned(),
                    kind: line.kind.as_str(),
                    quantity: line.quantity,
                    price: line.price.map(|p| p.to_string()).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/history.html")]
pub struct OrderHistoryTemplate {
    pub user: Option<CurrentUser>,
    pub orders: Vec<OrderView>,
}

/// Display the user's order history, newest first.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<OrderHistoryTemplate> {
    let orders = OrderRepository::new(state.pool());
    let history = orders.history_for_user(user.id).await?;

    Ok(OrderHistoryTemplate {
        user: Some(user),
        orders: history.iter().map(OrderView::from).collect(),
    })
}
