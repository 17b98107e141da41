//! Group page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use chrono::Utc;

use tandoori_core::GroupId;

use crate::db::{GroupRepository, OfferRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::models::offer::Offer;
use crate::state::AppState;

/// A group with member names, for the my-groups page.
#[derive(Clone)]
pub struct MyGroupView {
    pub id: i64,
    pub name: String,
    pub members: Vec<String>,
}

/// An offer for display on a group page.
#[derive(Clone)]
pub struct OfferView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub expires_at: String,
    pub remaining: i64,
    pub expired: bool,
    pub sold_out: bool,
}

impl OfferView {
    fn from_offer(offer: &Offer, now: chrono::DateTime<Utc>) -> Self {
        Self {
            id: offer.id.as_i64(),
            title: offer.title.clone(),
            description: offer.description.clone(),
            price: offer.price.to_string(),
            expires_at: offer.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            remaining: offer.remaining_claims(),
            expired: offer.is_expired(now),
            sold_out: offer.remaining_claims() == 0,
        }
    }
}

/// My-groups page template.
#[derive(Template, WebTemplate)]
#[template(path = "groups/my_groups.html")]
pub struct MyGroupsTemplate {
    pub user: Option<CurrentUser>,
    pub groups: Vec<MyGroupView>,
}

/// Group page template.
#[derive(Template, WebTemplate)]
#[template(path = "groups/show.html")]
pub struct GroupTemplate {
    pub user: Option<CurrentUser>,
    pub id: i64,
    pub name: String,
    pub members: Vec<String>,
    pub offers: Vec<OfferView>,
}

/// Display the groups the user belongs to, with fellow members.
pub async fn my_groups(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<MyGroupsTemplate> {
    let groups = GroupRepository::new(state.pool());
    let users = UserRepository::new(state.pool());

    let mine = groups.groups_for_user(user.id).await?;

    let mut views = Vec::with_capacity(mine.len());
    for group in mine {
        let members = users.member_names(group.id).await?;
        views.push(MyGroupView {
            id: group.id.as_i64(),
            name: group.name.as_str().to_owned(),
            members,
        });
    }

    Ok(MyGroupsTemplate {
        user: Some(user),
        groups: views,
    })
}

/// Display one group with its offers. Members only.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<GroupTemplate> {
    let group_id = GroupId::new(id);
    let groups = GroupRepository::new(state.pool());
    let offers = OfferRepository::new(state.pool());
    let users = UserRepository::new(state.pool());

    let group = groups
        .get(group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group {id}")))?;

    if !groups.is_member(group_id, user.id).await? {
        return Err(AppError::Forbidden("not a member of this group".to_owned()));
    }

    let now = Utc::now();
    let group_offers = offers.list_for_group(group_id).await?;
    let members = users.member_names(group_id).await?;

    Ok(GroupTemplate {
        user: Some(user),
        id: group.id.as_i64(),
        name: group.name.as_str().to_owned(),
        members,
        offers: group_offers
            .iter()
            .map(|offer| OfferView::from_offer(offer, now))
            .collect(),
    })
}
