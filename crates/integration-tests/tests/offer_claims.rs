//! Offer claiming: membership gate, expiry, and the capacity ledger.

#![allow(clippy::unwrap_used)]

use chrono::{TimeDelta, Utc};
use tandoori_core::OfferId;
use tandoori_integration_tests::TestContext;
use tandoori_server::db::OfferRepository;
use tandoori_server::services::{ClaimOutcome, OfferService};

#[tokio::test]
async fn member_claim_succeeds_and_decrements_remaining() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let group = ctx
        .create_group_with_members("Butter Chicken", &[alice.id])
        .await;
    let offer = ctx
        .create_offer(group, "Half-price Butter Chicken", TestContext::future_expiry(), 5)
        .await;

    let outcome = OfferService::new(&ctx.pool)
        .claim(offer, alice.id, Utc::now())
        .await
        .unwrap();

    let ClaimOutcome::Claimed(claimed) = outcome else {
        panic!("expected a successful claim, got {outcome:?}");
    };
    assert_eq!(claimed.claimed_count, 1);
    assert_eq!(claimed.remaining_claims(), 4);
}

#[tokio::test]
async fn claiming_a_missing_offer_reports_not_found() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    let outcome = OfferService::new(&ctx.pool)
        .claim(OfferId::new(4242), alice.id, Utc::now())
        .await
        .unwrap();

    assert!(matches!(outcome, ClaimOutcome::NotFound));
}

#[tokio::test]
async fn non_member_cannot_claim() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let outsider = ctx.create_user("Oscar", "oscar@example.com").await;
    let group = ctx
        .create_group_with_members("Paneer Tikka", &[alice.id])
        .await;
    let offer = ctx
        .create_offer(group, "Tikka Tuesday", TestContext::future_expiry(), 3)
        .await;

    let outcome = OfferService::new(&ctx.pool)
        .claim(offer, outsider.id, Utc::now())
        .await
        .unwrap();

    assert!(matches!(outcome, ClaimOutcome::NotAMember));
}

// Expiry is inclusive: at exactly `expires_at` the offer is already gone.
#[tokio::test]
async fn claim_at_the_expiry_instant_is_rejected() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let group = ctx
        .create_group_with_members("Veg Biryani", &[alice.id])
        .await;
    let expires_at = Utc::now() + TimeDelta::hours(1);
    let offer = ctx
        .create_offer(group, "Biryani Blast", expires_at, 3)
        .await;

    let service = OfferService::new(&ctx.pool);

    let at_boundary = service.claim(offer, alice.id, expires_at).await.unwrap();
    assert!(matches!(at_boundary, ClaimOutcome::Expired));

    let after = service
        .claim(offer, alice.id, expires_at + TimeDelta::seconds(1))
        .await
        .unwrap();
    assert!(matches!(after, ClaimOutcome::Expired));

    // A moment earlier the claim still goes through.
    let before = service
        .claim(offer, alice.id, expires_at - TimeDelta::seconds(1))
        .await
        .unwrap();
    assert!(matches!(before, ClaimOutcome::Claimed(_)));
}

#[tokio::test]
async fn offer_sells_out_at_capacity() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;
    let carol = ctx.create_user("Carol", "carol@example.com").await;
    let group = ctx
        .create_group_with_members("Garlic Naan", &[alice.id, bob.id, carol.id])
        .await;
    let offer = ctx
        .create_offer(group, "Naan Bonanza", TestContext::future_expiry(), 2)
        .await;

    let service = OfferService::new(&ctx.pool);
    let now = Utc::now();

    assert!(matches!(
        service.claim(offer, alice.id, now).await.unwrap(),
        ClaimOutcome::Claimed(_)
    ));
    assert!(matches!(
        service.claim(offer, bob.id, now).await.unwrap(),
        ClaimOutcome::Claimed(_)
    ));
    assert!(matches!(
        service.claim(offer, carol.id, now).await.unwrap(),
        ClaimOutcome::SoldOut
    ));

    // The ledger never overshoots.
    let stored = OfferRepository::new(&ctx.pool)
        .get(offer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.claimed_count, stored.max_claims);
}

// An offer that is both past its deadline and out of stock reads as expired.
#[tokio::test]
async fn expired_and_sold_out_offer_reports_expired() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;
    let group = ctx
        .create_group_with_members("Mango Lassi", &[alice.id, bob.id])
        .await;
    let expires_at = Utc::now() + TimeDelta::hours(1);
    let offer = ctx.create_offer(group, "Lassi O'Clock", expires_at, 1).await;

    let service = OfferService::new(&ctx.pool);

    // Fill the only slot while the offer is still live.
    assert!(matches!(
        service
            .claim(offer, alice.id, expires_at - TimeDelta::minutes(5))
            .await
            .unwrap(),
        ClaimOutcome::Claimed(_)
    ));

    let stored = OfferRepository::new(&ctx.pool)
        .get(offer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.claimed_count, stored.max_claims);

    let outcome = service
        .claim(offer, bob.id, expires_at + TimeDelta::seconds(1))
        .await
        .unwrap();
    assert!(matches!(outcome, ClaimOutcome::Expired));
}

#[tokio::test]
async fn racing_for_the_last_slot_yields_exactly_one_claim() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;
    let group = ctx
        .create_group_with_members("Gulab Jamun", &[alice.id, bob.id])
        .await;
    let offer = ctx
        .create_offer(group, "Last Jamun Standing", TestContext::future_expiry(), 1)
        .await;

    let service = OfferService::new(&ctx.pool);
    let now = Utc::now();
    let (a, b) = tokio::join!(
        service.claim(offer, alice.id, now),
        service.claim(offer, bob.id, now),
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let claimed = outcomes
        .iter()
        .filter(|o| matches!(o, ClaimOutcome::Claimed(_)))
        .count();
    let sold_out = outcomes
        .iter()
        .filter(|o| matches!(o, ClaimOutcome::SoldOut))
        .count();

    assert_eq!(claimed, 1);
    assert_eq!(sold_out, 1);

    let stored = OfferRepository::new(&ctx.pool)
        .get(offer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.claimed_count, 1);
}
