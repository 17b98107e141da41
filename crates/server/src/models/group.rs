//! Interest group models.

use tandoori_core::{GroupId, GroupName};

/// A named cohort of users who have all purchased the same menu item.
#[derive(Debug, Clone)]
pub struct Group {
    /// Group's database ID.
    pub id: GroupId,
    /// Unique name, derived from the item name (`"{item} Lovers"`).
    pub name: GroupName,
}

/// A group with its member count, for the admin dashboard.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: GroupName,
    pub member_count: i64,
}
