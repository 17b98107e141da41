//! Group formation.
//!
//! After an order's lines are written, every regular menu item on it is
//! re-examined: once at least [`MIN_GROUP_BUYERS`] distinct users have ever
//! bought that item, a group named after it exists and all of those buyers
//! are members. Formation runs inside the checkout transaction, so the order
//! and its group placements commit or roll back together.

use sqlx::SqliteConnection;

use tandoori_core::{GroupName, OrderId};

use crate::db::{RepositoryError, groups};
use crate::models::group::Group;

/// Distinct historical buyers an item needs before a group forms around it.
pub const MIN_GROUP_BUYERS: usize = 2;

/// Form or grow groups for every qualifying menu item on an order.
///
/// Idempotent: re-running for the same order changes nothing, since group
/// creation and membership inserts both tolerate existing rows. Returns the
/// groups the ordering user now belongs to because of this order, in item
/// order.
///
/// Offer and special lines never qualify; their buyers are counted for no
/// item and no group is named after them.
///
/// # Errors
///
/// Returns `RepositoryError` if any of the underlying queries fail.
pub async fn form_groups_for_order(
    conn: &mut SqliteConnection,
    order_id: OrderId,
) -> Result<Vec<Group>, RepositoryError> {
    let items = groups::distinct_menu_items_of_order(&mut *conn, order_id).await?;

    let mut placed = Vec::new();
    for item in items {
        let buyers = groups::distinct_buyers_of_item(&mut *conn, &item).await?;
        if buyers.len() < MIN_GROUP_BUYERS {
            continue;
        }

        let name = GroupName::for_item(&item);
        let group_id = groups::find_or_create(&mut *conn, &name).await?;

        // Every historical buyer joins, not just the current orderer. The
        // user whose purchase tipped the count is enrolled the same way as
        // the buyers who ordered before the group existed.
        for buyer in buyers {
            groups::add_member_if_absent(&mut *conn, group_id, buyer).await?;
        }

        placed.push(Group {
            id: group_id,
            name,
        });
    }

    Ok(placed)
}
