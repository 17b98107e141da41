//! Menu item names and the group names derived from them.
//!
//! Order lines store the item name denormalized (not a foreign key into the
//! menu), so historical orders stay stable when menu items are renamed or
//! deleted. Group identity is derived deterministically from an item name,
//! which makes name handling load-bearing: the same item name must always
//! map to the same group.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemName`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ItemNameError {
    /// The input string is empty or only whitespace.
    #[error("item name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("item name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The display name of a purchasable item, as stored on order lines.
///
/// Leading and trailing whitespace is trimmed on parse so that carts built
/// from form input cannot produce two groups for the same dish.
///
/// ## Examples
///
/// ```
/// use tandoori_core::ItemName;
///
/// let name = ItemName::parse("Veg Burger").unwrap();
/// assert_eq!(name.as_str(), "Veg Burger");
/// assert!(ItemName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Maximum length of an item name.
    pub const MAX_LENGTH: usize = 120;

    /// Parse an `ItemName` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, ItemNameError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ItemNameError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(ItemNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the item name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ItemName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The unique name of an interest group.
///
/// Group names are derived deterministically from item names, so re-deriving
/// the name for the same item always resolves to the same group row.
///
/// ## Examples
///
/// ```
/// use tandoori_core::{GroupName, ItemName};
///
/// let item = ItemName::parse("Veg Burger").unwrap();
/// let group = GroupName::for_item(&item);
/// assert_eq!(group.as_str(), "Veg Burger Lovers");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Suffix appended to an item name to form its group name.
    const SUFFIX: &'static str = " Lovers";

    /// Derive the group name for an item.
    #[must_use]
    pub fn for_item(item: &ItemName) -> Self {
        Self(format!("{}{}", item.as_str(), Self::SUFFIX))
    }

    /// Wrap an already-derived group name (e.g., read back from storage).
    #[must_use]
    pub fn from_stored(s: String) -> Self {
        Self(s)
    }

    /// Returns the group name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `GroupName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name_trims() {
        let name = ItemName::parse("  Cold Coffee ").unwrap();
        assert_eq!(name.as_str(), "Cold Coffee");
    }

    #[test]
    fn test_item_name_rejects_empty() {
        assert!(matches!(ItemName::parse(""), Err(ItemNameError::Empty)));
        assert!(matches!(ItemName::parse("  \t"), Err(ItemNameError::Empty)));
    }

    #[test]
    fn test_item_name_rejects_too_long() {
        let long = "x".repeat(200);
        assert!(matches!(
            ItemName::parse(&long),
            Err(ItemNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_group_name_is_deterministic() {
        let a = ItemName::parse("Chicken Biryani").unwrap();
        let b = ItemName::parse("Chicken Biryani  ").unwrap();
        assert_eq!(GroupName::for_item(&a), GroupName::for_item(&b));
        assert_eq!(GroupName::for_item(&a).as_str(), "Chicken Biryani Lovers");
    }
}
