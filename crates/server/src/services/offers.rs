//! Offer claims.
//!
//! The claim ledger: every offer carries a capacity (`max_claims`) and a
//! deadline (`expires_at`), and a claim succeeds only if the offer exists,
//! the claimant belongs to its group, the deadline has not passed, and a
//! slot remains. The slot itself is taken by a single conditional UPDATE,
//! so overclaiming is impossible no matter how many claimants race.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use tandoori_core::{OfferId, UserId};

use crate::db::{GroupRepository, OfferRepository, RepositoryError};
use crate::models::offer::Offer;

/// Errors that can occur while claiming.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The result of a claim attempt. Checks are ordered: a missing offer is
/// reported before expiry, and expiry before exhaustion, so an expired
/// sold-out offer reads as expired.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// The claim took a slot. Carries the offer as it stood after the claim.
    Claimed(Offer),
    /// No offer with this ID.
    NotFound,
    /// The claimant is not a member of the offer's group.
    NotAMember,
    /// The deadline has passed.
    Expired,
    /// All slots are taken.
    SoldOut,
}

/// Offer claim service.
pub struct OfferService<'a> {
    offers: OfferRepository<'a>,
    groups: GroupRepository<'a>,
}

impl<'a> OfferService<'a> {
    /// Create a new offer service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            offers: OfferRepository::new(pool),
            groups: GroupRepository::new(pool),
        }
    }

    /// Attempt to claim one slot of an offer for a user.
    ///
    /// Expiry is checked against `now` before the slot is taken, and the
    /// slot is taken by a conditional increment that only matches while
    /// `claimed_count < max_claims`. Two users racing for the last slot
    /// both pass the read-side checks, but only one increment matches; the
    /// loser gets [`ClaimOutcome::SoldOut`].
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Repository` if a query fails.
    pub async fn claim(
        &self,
        offer_id: OfferId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, ClaimError> {
        let Some(offer) = self.offers.get(offer_id).await? else {
            return Ok(ClaimOutcome::NotFound);
        };

        if !self.groups.is_member(offer.group_id, user_id).await? {
            return Ok(ClaimOutcome::NotAMember);
        }

        if offer.is_expired(now) {
            return Ok(ClaimOutcome::Expired);
        }

        if !self.offers.try_increment_claims(offer_id).await? {
            return Ok(ClaimOutcome::SoldOut);
        }

        // Re-read for the post-claim counts shown to the user. Another
        // claimant may land between the increment and this read; the counts
        // are a snapshot, the claim itself is already durable.
        let claimed = self
            .offers
            .get(offer_id)
            .await?
            .ok_or_else(|| RepositoryError::DataCorruption(
                "offer deleted mid-claim".to_owned(),
            ))?;

        Ok(ClaimOutcome::Claimed(claimed))
    }
}
