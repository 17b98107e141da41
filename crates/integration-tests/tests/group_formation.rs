//! Group formation at checkout.
//!
//! Groups exist per menu item, named `"{item} Lovers"`, and a buyer lands in
//! one as soon as at least two distinct users have ordered that item.

#![allow(clippy::unwrap_used)]

use tandoori_core::{GroupName, ItemKind, ItemName, Price};
use tandoori_integration_tests::TestContext;
use tandoori_server::db::{GroupRepository, UserRepository};
use tandoori_server::models::Cart;
use tandoori_server::services::CheckoutService;

#[tokio::test]
async fn solo_buyer_forms_no_group() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    let receipt = ctx
        .order_menu_items(alice.id, &[("Butter Chicken", 320, 1)])
        .await;

    assert!(receipt.groups_joined.is_empty());
    let groups = GroupRepository::new(&ctx.pool).list().await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn second_distinct_buyer_forms_group_with_both_members() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    ctx.order_menu_items(alice.id, &[("Butter Chicken", 320, 1)])
        .await;
    let receipt = ctx
        .order_menu_items(bob.id, &[("Butter Chicken", 320, 2)])
        .await;

    assert_eq!(receipt.groups_joined.len(), 1);
    let group = &receipt.groups_joined[0];
    assert_eq!(group.name.as_str(), "Butter Chicken Lovers");

    let repo = GroupRepository::new(&ctx.pool);
    assert!(repo.is_member(group.id, alice.id).await.unwrap());
    assert!(repo.is_member(group.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn third_buyer_joins_existing_group() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;
    let carol = ctx.create_user("Carol", "carol@example.com").await;

    ctx.order_menu_items(alice.id, &[("Veg Biryani", 180, 1)])
        .await;
    let first = ctx
        .order_menu_items(bob.id, &[("Veg Biryani", 180, 1)])
        .await;
    let second = ctx
        .order_menu_items(carol.id, &[("Veg Biryani", 180, 1)])
        .await;

    assert_eq!(second.groups_joined.len(), 1);
    assert_eq!(second.groups_joined[0].id, first.groups_joined[0].id);

    let names = UserRepository::new(&ctx.pool)
        .member_names(first.groups_joined[0].id)
        .await
        .unwrap();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

#[tokio::test]
async fn repeat_purchases_by_same_user_do_not_count_as_two_buyers() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    ctx.order_menu_items(alice.id, &[("Garlic Naan", 60, 3)])
        .await;
    let receipt = ctx
        .order_menu_items(alice.id, &[("Garlic Naan", 60, 1)])
        .await;

    assert!(receipt.groups_joined.is_empty());
    let groups = GroupRepository::new(&ctx.pool).list().await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn offer_and_special_lines_never_form_groups() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    let mut cart = Cart::default();
    cart.add(
        "offer_1".to_owned(),
        ItemName::parse("Weekend Thali Deal").unwrap(),
        ItemKind::Offer,
        Price::from_rupees(199).unwrap(),
        1,
    );
    cart.add(
        "special_1".to_owned(),
        ItemName::parse("Mango Lassi").unwrap(),
        ItemKind::Special,
        Price::from_rupees(80).unwrap(),
        1,
    );

    let checkout = CheckoutService::new(&ctx.pool);
    checkout.place_order(alice.id, &cart, "cash").await.unwrap();
    let receipt = checkout.place_order(bob.id, &cart, "cash").await.unwrap();

    assert!(receipt.groups_joined.is_empty());
    let groups = GroupRepository::new(&ctx.pool).list().await.unwrap();
    assert!(groups.is_empty());
}

// A regular menu item whose name happens to start with "Offer" is still a
// menu item; only the line's kind decides eligibility.
#[tokio::test]
async fn menu_item_named_like_an_offer_still_forms_a_group() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    ctx.order_menu_items(alice.id, &[("Offer Platter", 250, 1)])
        .await;
    let receipt = ctx
        .order_menu_items(bob.id, &[("Offer Platter", 250, 1)])
        .await;

    assert_eq!(receipt.groups_joined.len(), 1);
    assert_eq!(receipt.groups_joined[0].name.as_str(), "Offer Platter Lovers");
}

#[tokio::test]
async fn reordering_an_item_reuses_the_group_without_duplicates() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    ctx.order_menu_items(alice.id, &[("Paneer Tikka", 240, 1)])
        .await;
    ctx.order_menu_items(bob.id, &[("Paneer Tikka", 240, 1)])
        .await;
    // Bob orders the same dish again after the group already exists.
    let receipt = ctx
        .order_menu_items(bob.id, &[("Paneer Tikka", 240, 1)])
        .await;

    assert_eq!(receipt.groups_joined.len(), 1);

    let repo = GroupRepository::new(&ctx.pool);
    let name = GroupName::for_item(&ItemName::parse("Paneer Tikka").unwrap());
    let group = repo.get_by_name(&name).await.unwrap().unwrap();
    let names = UserRepository::new(&ctx.pool)
        .member_names(group.id)
        .await
        .unwrap();
    assert_eq!(names.len(), 2);

    // Still exactly one group.
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn one_order_can_place_the_buyer_in_several_groups() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    ctx.order_menu_items(alice.id, &[("Dal Makhani", 200, 1), ("Jeera Rice", 120, 1)])
        .await;
    let receipt = ctx
        .order_menu_items(bob.id, &[("Dal Makhani", 200, 1), ("Jeera Rice", 120, 1)])
        .await;

    let mut names: Vec<_> = receipt
        .groups_joined
        .iter()
        .map(|g| g.name.as_str().to_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Dal Makhani Lovers", "Jeera Rice Lovers"]);
}
