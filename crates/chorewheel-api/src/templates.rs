//! Handlers for `/templates` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/templates` | |
//! | `POST`   | `/templates` | Body: [`NewTemplateBody`]; returns 201 + template |
//! | `PUT`    | `/templates/:id` | Body: full [`WeeklyChoreTemplate`] |
//! | `DELETE` | `/templates/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chorewheel_core::{
  chore::{Category, Priority},
  member::WeeklyChoreTemplate,
  repository::HouseholdRepository,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{OutcomeResponse, error::ApiError, service::HouseholdService};

/// `GET /templates`
pub async fn list<R>(
  State(service): State<Arc<HouseholdService<R>>>,
) -> Json<Vec<WeeklyChoreTemplate>>
where
  R: HouseholdRepository,
{
  Json(service.read(|h| h.templates().to_vec()).await)
}

/// JSON body accepted by `POST /templates`.
#[derive(Debug, Deserialize)]
pub struct NewTemplateBody {
  pub title:             String,
  #[serde(default)]
  pub description:       String,
  #[serde(default)]
  pub category:          Category,
  #[serde(default)]
  pub estimated_minutes: u32,
  #[serde(default)]
  pub priority:          Priority,
}

impl From<NewTemplateBody> for WeeklyChoreTemplate {
  fn from(b: NewTemplateBody) -> Self {
    WeeklyChoreTemplate {
      id:                Uuid::new_v4(),
      title:             b.title,
      description:       b.description,
      category:          b.category,
      estimated_minutes: b.estimated_minutes,
      priority:          b.priority,
    }
  }
}

/// `POST /templates`: returns 201 + the stored template.
pub async fn create<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Json(body): Json<NewTemplateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  R: HouseholdRepository,
{
  let template = WeeklyChoreTemplate::from(body);
  let stored = template.clone();
  service
    .mutate(|h| h.add_template(template))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

/// `PUT /templates/:id`
pub async fn update<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
  Json(mut template): Json<WeeklyChoreTemplate>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  template.id = id;
  let outcome = service
    .mutate(|h| h.update_template(template))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}

/// `DELETE /templates/:id`
pub async fn remove<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let outcome = service
    .mutate(|h| h.remove_template(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}
