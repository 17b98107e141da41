//! Daily special model.

use chrono::{DateTime, Utc};

use tandoori_core::{ItemName, Price, SpecialId};

/// An admin-curated daily special. No group targeting and no capacity limit;
/// stale specials are swept when a new one is posted.
#[derive(Debug, Clone)]
pub struct Special {
    pub id: SpecialId,
    pub item_name: ItemName,
    pub category: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}
