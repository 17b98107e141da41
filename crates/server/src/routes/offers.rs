//! Offer claim route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::instrument;

use tandoori_core::OfferId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::{ClaimOutcome, OfferService};
use crate::state::AppState;

/// Claim result page template. Rendered for every outcome; the HTTP status
/// distinguishes them for non-browser clients.
#[derive(Template, WebTemplate)]
#[template(path = "offers/claim_result.html")]
pub struct ClaimResultTemplate {
    pub user: Option<CurrentUser>,
    pub heading: String,
    pub detail: String,
    pub claimed: bool,
    pub group_id: Option<i64>,
}

/// Attempt to claim an offer slot.
///
/// Outcomes map to statuses: success 200, unknown offer 404, non-member 403,
/// expired 410, sold out 409.
#[instrument(skip_all, fields(offer_id = id))]
pub async fn claim(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Response> {
    let offers = OfferService::new(state.pool());
    let outcome = offers.claim(OfferId::new(id), user.id, Utc::now()).await?;

    let user = Some(user);
    let page = match outcome {
        ClaimOutcome::Claimed(offer) => {
            tracing::info!(offer_id = id, remaining = offer.remaining_claims(), "offer claimed");
            let template = ClaimResultTemplate {
                user,
                heading: format!("You claimed {}!", offer.title),
                detail: format!(
                    "{} of {} claims remain. Add it to your cart from the group page to order it.",
                    offer.remaining_claims(),
                    offer.max_claims
                ),
                claimed: true,
                group_id: Some(offer.group_id.as_i64()),
            };
            (StatusCode::OK, template)
        }
        ClaimOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            ClaimResultTemplate {
                user,
                heading: "Offer not found".to_owned(),
                detail: "That offer does not exist.".to_owned(),
                claimed: false,
                group_id: None,
            },
        ),
        ClaimOutcome::NotAMember => (
            StatusCode::FORBIDDEN,
            ClaimResultTemplate {
                user,
                heading: "Members only".to_owned(),
                detail: "This offer is reserved for members of its group.".to_owned(),
                claimed: false,
                group_id: None,
            },
        ),
        ClaimOutcome::Expired => (
            StatusCode::GONE,
            ClaimResultTemplate {
                user,
                heading: "Offer expired".to_owned(),
                detail: "This offer's deadline has passed.".to_owned(),
                claimed: false,
                group_id: None,
            },
        ),
        ClaimOutcome::SoldOut => (
            StatusCode::CONFLICT,
            ClaimResultTemplate {
                user,
                heading: "Fully claimed".to_owned(),
                detail: "All slots for this offer have been taken.".to_owned(),
                claimed: false,
                group_id: None,
            },
        ),
    };

    Ok(page.into_response())
}
