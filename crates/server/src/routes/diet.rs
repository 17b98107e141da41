//! Diet menu request route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use tandoori_core::{DietRequestId, DietStatus};

use crate::db::DietRepository;
use crate::db::diet::NewDietRequest;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::models::diet::DietRequest;
use crate::state::AppState;

/// Diet request form fields.
#[derive(Deserialize)]
pub struct DietForm {
    pub name: String,
    pub shift: String,
    pub mobile: String,
    pub days: String,
    pub months: String,
    pub liquids: String,
    pub nonveg: String,
    pub food_items: String,
}

/// A request for display.
#[derive(Clone)]
pub struct DietRequestView {
    pub id: i64,
    pub name: String,
    pub shift: String,
    pub food_items: String,
    pub status: &'static str,
    pub downloadable: bool,
    pub submitted_at: String,
}

impl From<&DietRequest> for DietRequestView {
    fn from(request: &DietRequest) -> Self {
        Self {
            id: request.id.as_i64(),
            name: request.name.clone(),
            shift: request.shift.clone(),
            food_items: request.food_items.clone(),
            status: request.status.as_str(),
            downloadable: request.status == DietStatus::Accepted,
            submitted_at: request.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Diet page template: the request form plus the user's own requests.
#[derive(Template, WebTemplate)]
#[template(path = "diet/form.html")]
pub struct DietTemplate {
    pub user: Option<CurrentUser>,
    pub requests: Vec<DietRequestView>,
}

/// Display the diet request form and the user's requests.
pub async fn form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<DietTemplate> {
    let diet = DietRepository::new(state.pool());
    let requests = diet.for_user(user.id).await?;

    Ok(DietTemplate {
        user: Some(user),
        requests: requests.iter().map(DietRequestView::from).collect(),
    })
}

/// Submit a diet request.
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<DietForm>,
) -> Result<Response> {
    if form.name.trim().is_empty() || form.food_items.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and food items are required".to_owned(),
        ));
    }

    let diet = DietRepository::new(state.pool());
    diet.create(
        user.id,
        &NewDietRequest {
            name: form.name.trim().to_owned(),
            shift: form.shift.trim().to_owned(),
            mobile: form.mobile.trim().to_owned(),
            days: form.days.trim().to_owned(),
            months: form.months.trim().to_owned(),
            liquids: form.liquids.trim().to_owned(),
            nonveg: form.nonveg.trim().to_owned(),
            food_items: form.food_items.trim().to_owned(),
        },
    )
    .await?;

    Ok(Redirect::to("/diet").into_response())
}

/// Download an accepted plan as a plain-text file. Owner only, and only
/// after an admin has accepted the request.
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Response> {
    let diet = DietRepository::new(state.pool());

    let request = diet
        .get_for_user(DietRequestId::new(id), user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("diet request {id}")))?;

    if request.status != DietStatus::Accepted {
        return Err(AppError::Forbidden(
            "this request has not been accepted yet".to_owned(),
        ));
    }

    let filename = format!("diet_plan_{id}.txt");
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        request.as_download_text(),
    )
        .into_response())
}
