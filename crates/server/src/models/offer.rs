//! Group offer model.

use chrono::{DateTime, Utc};

use tandoori_core::{GroupId, OfferId, Price};

/// A time-limited, capacity-limited offer targeted at one group.
///
/// Invariant (enforced by the claim ledger and a CHECK constraint):
/// `0 <= claimed_count <= max_claims` at all times.
#[derive(Debug, Clone)]
pub struct Offer {
    /// Offer's database ID.
    pub id: OfferId,
    /// The group this offer targets.
    pub group_id: GroupId,
    /// Short title shown on group pages.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Offer price.
    pub price: Price,
    /// Claims are rejected at or after this instant.
    pub expires_at: DateTime<Utc>,
    /// Capacity: maximum number of successful claims.
    pub max_claims: i64,
    /// Successful claims so far.
    pub claimed_count: i64,
}

impl Offer {
    /// Whether the offer is expired at `now`. Expiry is inclusive: a claim
    /// at exactly the expiry instant is rejected.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Claims still available. Never negative.
    #[must_use]
    pub const fn remaining_claims(&self) -> i64 {
        let remaining = self.max_claims - self.claimed_count;
        if remaining < 0 { 0 } else { remaining }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn offer_expiring_at(expires_at: DateTime<Utc>) -> Offer {
        Offer {
            id: OfferId::new(1),
            group_id: GroupId::new(1),
            title: "Biryani Night".to_owned(),
            description: "Half price for lovers".to_owned(),
            price: Price::from_rupees(125).unwrap_or_default(),
            expires_at,
            max_claims: 5,
            claimed_count: 0,
        }
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let now = Utc::now();
        let offer = offer_expiring_at(now);
        assert!(offer.is_expired(now));
        assert!(offer.is_expired(now + TimeDelta::seconds(1)));
        assert!(!offer.is_expired(now - TimeDelta::seconds(1)));
    }

    #[test]
    fn test_remaining_claims_never_negative() {
        let mut offer = offer_expiring_at(Utc::now());
        offer.claimed_count = 5;
        assert_eq!(offer.remaining_claims(), 0);
        offer.claimed_count = 7;
        assert_eq!(offer.remaining_claims(), 0);
        offer.claimed_count = 2;
        assert_eq!(offer.remaining_claims(), 3);
    }
}
