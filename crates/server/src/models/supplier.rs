//! Supplier listing models.

use chrono::{DateTime, Utc};

use tandoori_core::{ItemName, Price, SupplierItemId, UserId};

/// An ingredient listing published by a user.
#[derive(Debug, Clone)]
pub struct SupplierItem {
    pub id: SupplierItemId,
    pub user_id: UserId,
    pub item_name: ItemName,
    pub category: String,
    pub price_per_kg: Price,
    /// Free-text quantity on offer (e.g., "25 kg").
    pub quantity: String,
    pub location: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

/// A listing joined with the publishing user's name, for the admin browser.
#[derive(Debug, Clone)]
pub struct SupplierListing {
    pub supplier_name: String,
    pub item: SupplierItem,
}

/// Sort order for the admin supplier browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplierSort {
    /// Newest listings first (the default).
    #[default]
    Newest,
    /// Cheapest per kilogram first.
    PriceLowToHigh,
}

impl SupplierSort {
    /// Parse the `sort` query parameter; unknown values fall back to newest.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("low") => Self::PriceLowToHigh,
            _ => Self::Newest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parses_low() {
        assert_eq!(
            SupplierSort::from_query(Some("low")),
            SupplierSort::PriceLowToHigh
        );
    }

    #[test]
    fn test_sort_defaults_to_newest() {
        assert_eq!(SupplierSort::from_query(None), SupplierSort::Newest);
        assert_eq!(SupplierSort::from_query(Some("high")), SupplierSort::Newest);
    }
}
