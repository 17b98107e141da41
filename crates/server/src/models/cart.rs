//! Server-side session cart.
//!
//! The cart lives in the session, keyed by a stable line key so that menu
//! items, offers, and specials with clashing names never merge into one
//! line. At checkout the cart is handed to the checkout service as an
//! explicit list of lines; nothing below the route layer touches sessions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tandoori_core::{ItemKind, ItemName, MenuItemId, OfferId, Price, SpecialId};

/// One line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Display name, copied onto the order line at checkout.
    pub name: ItemName,
    /// What kind of purchasable this line refers to.
    pub kind: ItemKind,
    /// Unit price at the time the line was added.
    pub price: Price,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total (unit price times quantity).
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The session cart: an ordered map of line key to line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

impl Cart {
    /// Line key for a regular menu item.
    #[must_use]
    pub fn menu_key(id: MenuItemId) -> String {
        format!("menu_{id}")
    }

    /// Line key for a group offer.
    #[must_use]
    pub fn offer_key(id: OfferId) -> String {
        format!("offer_{id}")
    }

    /// Line key for a daily special.
    #[must_use]
    pub fn special_key(id: SpecialId) -> String {
        format!("special_{id}")
    }

    /// Add a line, merging quantities when the key already exists.
    pub fn add(&mut self, key: String, name: ItemName, kind: ItemKind, price: Price, quantity: u32) {
        let quantity = quantity.max(1);
        self.lines
            .entry(key)
            .and_modify(|line| line.quantity = line.quantity.saturating_add(quantity))
            .or_insert(CartLine {
                name,
                kind,
                price,
                quantity,
            });
    }

    /// Remove a line by key. Unknown keys are a no-op.
    pub fn remove(&mut self, key: &str) {
        self.lines.remove(key);
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines
            .values()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Cart total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .values()
            .fold(Price::default(), |acc, line| acc.plus(line.line_total()))
    }

    /// Iterate over (key, line) pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over lines in key order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line_item(name: &str) -> ItemName {
        ItemName::parse(name).unwrap()
    }

    fn rupees(amount: i64) -> Price {
        Price::from_rupees(amount).unwrap()
    }

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = Cart::default();
        let key = Cart::menu_key(MenuItemId::new(4));
        cart.add(key.clone(), line_item("Veg Burger"), ItemKind::Menu, rupees(120), 1);
        cart.add(key, line_item("Veg Burger"), ItemKind::Menu, rupees(120), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.total(), rupees(360));
    }

    #[test]
    fn test_offer_and_menu_lines_stay_distinct() {
        let mut cart = Cart::default();
        cart.add(
            Cart::menu_key(MenuItemId::new(1)),
            line_item("Cold Coffee"),
            ItemKind::Menu,
            rupees(90),
            1,
        );
        cart.add(
            Cart::offer_key(OfferId::new(1)),
            line_item("Cold Coffee"),
            ItemKind::Offer,
            rupees(50),
            1,
        );

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), rupees(140));
    }

    #[test]
    fn test_remove_and_clear_semantics() {
        let mut cart = Cart::default();
        let key = Cart::special_key(SpecialId::new(9));
        cart.add(key.clone(), line_item("Paneer Tikka"), ItemKind::Special, rupees(180), 1);
        assert!(!cart.is_empty());

        cart.remove("no_such_key");
        assert_eq!(cart.len(), 1);

        cart.remove(&key);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_is_clamped() {
        let mut cart = Cart::default();
        cart.add(
            Cart::menu_key(MenuItemId::new(2)),
            line_item("Mutton Biryani"),
            ItemKind::Menu,
            rupees(320),
            0,
        );
        assert_eq!(cart.unit_count(), 1);
    }
}
