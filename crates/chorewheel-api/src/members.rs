//! Handlers for `/members` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/members` | Optional `?active=true` |
//! | `POST`   | `/members` | Body: [`NewMemberBody`]; returns 201 + member |
//! | `PUT`    | `/members/:id` | Body: full [`HouseholdMember`] |
//! | `DELETE` | `/members/:id` | Also deletes chores assigned to the member's name |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chorewheel_core::{member::HouseholdMember, repository::HouseholdRepository};
use serde::Deserialize;
use uuid::Uuid;

use crate::{OutcomeResponse, error::ApiError, service::HouseholdService};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub active: bool,
}

/// `GET /members[?active=true]`
pub async fn list<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<HouseholdMember>>
where
  R: HouseholdRepository,
{
  let members = service
    .read(|h| {
      if params.active {
        h.active_members().into_iter().cloned().collect()
      } else {
        h.members().to_vec()
      }
    })
    .await;
  Json(members)
}

/// JSON body accepted by `POST /members`.
#[derive(Debug, Deserialize)]
pub struct NewMemberBody {
  pub name:      String,
  #[serde(default)]
  pub color:     String,
  pub is_active: Option<bool>,
}

/// `POST /members`: returns 201 + the stored member.
pub async fn create<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Json(body): Json<NewMemberBody>,
) -> Result<impl IntoResponse, ApiError>
where
  R: HouseholdRepository,
{
  let mut member = HouseholdMember::new(body.name, body.color);
  member.is_active = body.is_active.unwrap_or(true);
  let stored = member.clone();
  service
    .mutate(|h| h.add_member(member))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

/// `PUT /members/:id`
pub async fn update<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
  Json(mut member): Json<HouseholdMember>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  member.id = id;
  let outcome = service
    .mutate(|h| h.update_member(member))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}

/// `DELETE /members/:id`
pub async fn remove<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let outcome = service
    .mutate(|h| h.remove_member(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}
