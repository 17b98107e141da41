//! Whole-rupee price type.
//!
//! The menu is priced in whole rupees, so prices are plain integers rather
//! than decimals. Negative prices are rejected at construction.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in whole rupees.
///
/// ## Examples
///
/// ```
/// use tandoori_core::Price;
///
/// let price = Price::from_rupees(250).unwrap();
/// assert_eq!(price.rupees(), 250);
/// assert_eq!(price.to_string(), "₹250");
/// assert!(Price::from_rupees(-1).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from whole rupees. Returns `None` for negative values.
    #[must_use]
    pub const fn from_rupees(rupees: i64) -> Option<Self> {
        if rupees < 0 { None } else { Some(Self(rupees)) }
    }

    /// The amount in whole rupees.
    #[must_use]
    pub const fn rupees(self) -> i64 {
        self.0
    }

    /// Multiply by a quantity, saturating at `i64::MAX`.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Sum two prices, saturating at `i64::MAX`.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(Price::from_rupees(-10).is_none());
        assert!(Price::from_rupees(0).is_some());
    }

    #[test]
    fn test_line_total() {
        let price = Price::from_rupees(120).unwrap();
        assert_eq!(price.times(3).rupees(), 360);
    }

    #[test]
    fn test_sum() {
        let a = Price::from_rupees(90).unwrap();
        let b = Price::from_rupees(299).unwrap();
        assert_eq!(a.plus(b).rupees(), 389);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_rupees(299).unwrap().to_string(), "₹299");
    }
}
