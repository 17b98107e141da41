//! Order history models.

use chrono::{DateTime, Utc};

use tandoori_core::{ItemKind, ItemName, OrderId, Price, UserId};

/// A placed order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Order's database ID.
    pub id: OrderId,
    /// The user who placed it.
    pub user_id: UserId,
    /// Simulated payment method recorded at checkout.
    pub payment_method: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// One line of a historical order, joined back to the current menu for a
/// best-effort price (the menu item may have been renamed or deleted since).
#[derive(Debug, Clone)]
pub struct HistoryLine {
    pub item_name: ItemName,
    pub kind: ItemKind,
    pub quantity: u32,
    /// Current menu price, if the item still exists on the menu.
    pub price: Option<Price>,
}

/// An order with its lines and a best-effort total.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub lines: Vec<HistoryLine>,
    pub total: Price,
}
