//! Status and kind enums stored as text in SQLite.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored kind/status string is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unrecognized value: {0}")]
pub struct ParseKindError(pub String);

/// What kind of purchasable an order line refers to.
///
/// Order lines carry an explicit kind tag instead of inferring "this is a
/// promotional offer" from the item's display title, so a menu item that
/// happens to be named "Offer Special" is still a regular menu purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A regular menu item. Only these participate in group formation.
    #[default]
    Menu,
    /// A group-targeted promotional offer.
    Offer,
    /// An admin-curated daily special.
    Special,
}

impl ItemKind {
    /// The stored text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Offer => "offer",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Self::Menu),
            "offer" => Ok(Self::Offer),
            "special" => Ok(Self::Special),
            other => Err(ParseKindError(other.to_owned())),
        }
    }
}

/// Review status of a diet menu request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietStatus {
    /// Submitted, awaiting admin review.
    #[default]
    Pending,
    /// Approved; the customer may download the plan.
    Accepted,
    /// Rejected by an admin.
    Rejected,
}

impl DietStatus {
    /// The stored text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accept",
            Self::Rejected => "Reject",
        }
    }
}

impl fmt::Display for DietStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietStatus {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Accept" => Ok(Self::Accepted),
            "Reject" => Ok(Self::Rejected),
            other => Err(ParseKindError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_roundtrip() {
        for kind in [ItemKind::Menu, ItemKind::Offer, ItemKind::Special] {
            assert_eq!(kind.as_str().parse::<ItemKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_item_kind_rejects_unknown() {
        assert!("Offer Special".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_diet_status_roundtrip() {
        for status in [
            DietStatus::Pending,
            DietStatus::Accepted,
            DietStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<DietStatus>().ok(), Some(status));
        }
    }
}
