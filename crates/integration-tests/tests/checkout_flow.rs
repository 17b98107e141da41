//! Checkout: order persistence, receipts, and order history.

#![allow(clippy::unwrap_used)]

use tandoori_core::ItemKind;
use tandoori_integration_tests::TestContext;
use tandoori_server::db::OrderRepository;
use tandoori_server::models::Cart;
use tandoori_server::services::{CheckoutError, CheckoutService};

#[tokio::test]
async fn checkout_persists_the_order_and_its_lines() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    ctx.add_menu_item("Butter Chicken", 320).await;
    ctx.add_menu_item("Garlic Naan", 60).await;

    let receipt = ctx
        .order_menu_items(alice.id, &[("Butter Chicken", 320, 1), ("Garlic Naan", 60, 4)])
        .await;

    assert_eq!(receipt.total.rupees(), 320 + 60 * 4);

    let history = OrderRepository::new(&ctx.pool)
        .history_for_user(alice.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);

    let order = &history[0];
    assert_eq!(order.order.id, receipt.order_id);
    assert_eq!(order.order.payment_method, "cash");
    assert_eq!(order.lines.len(), 2);
    assert!(order.lines.iter().all(|line| line.kind == ItemKind::Menu));

    let naan = order
        .lines
        .iter()
        .find(|line| line.item_name.as_str() == "Garlic Naan")
        .unwrap();
    assert_eq!(naan.quantity, 4);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    let result = CheckoutService::new(&ctx.pool)
        .place_order(alice.id, &Cart::default(), "cash")
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));

    let history = OrderRepository::new(&ctx.pool)
        .history_for_user(alice.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn receipt_reports_groups_joined_by_this_order() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;
    let bob = ctx.create_user("Bob", "bob@example.com").await;

    ctx.order_menu_items(alice.id, &[("Dal Makhani", 200, 1)])
        .await;
    let receipt = ctx
        .order_menu_items(bob.id, &[("Dal Makhani", 200, 1)])
        .await;

    assert_eq!(receipt.groups_joined.len(), 1);
    assert_eq!(receipt.groups_joined[0].name.as_str(), "Dal Makhani Lovers");
}

#[tokio::test]
async fn history_lists_newest_orders_first() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    let first = ctx
        .order_menu_items(alice.id, &[("Samosa", 40, 2)])
        .await;
    let second = ctx
        .order_menu_items(alice.id, &[("Masala Chai", 30, 1)])
        .await;

    let history = OrderRepository::new(&ctx.pool)
        .history_for_user(alice.id)
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order.id, second.order_id);
    assert_eq!(history[1].order.id, first.order_id);
}

#[tokio::test]
async fn history_totals_cover_every_line() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("Alice", "alice@example.com").await;

    ctx.add_menu_item("Samosa", 40).await;
    ctx.add_menu_item("Masala Chai", 30).await;

    ctx.order_menu_items(alice.id, &[("Samosa", 40, 2), ("Masala Chai", 30, 3)])
        .await;

    let history = OrderRepository::new(&ctx.pool)
        .history_for_user(alice.id)
        .await
        .unwrap();
    assert_eq!(history[0].total.rupees(), 40 * 2 + 30 * 3);
}
