//! Handlers for `/chores` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/chores` | Optional `?q=<text>` and `?filter=pending\|completed\|overdue\|weekly\|completed_weekly\|manual` |
//! | `POST`   | `/chores` | Body: [`NewChore`]; returns 201 + stored chore |
//! | `GET`    | `/chores/:id` | 404 if not found |
//! | `PUT`    | `/chores/:id` | Body: full [`Chore`]; the path id wins |
//! | `DELETE` | `/chores/:id` | |
//! | `POST`   | `/chores/:id/toggle` | Flip completion |
//! | `POST`   | `/chores/clear-completed` | Optional `?scope=all\|weekly\|manual` |
//!
//! Mutations answer `{"outcome": ...}`; a missing id is `no_op_not_found`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chorewheel_core::{
  chore::{Chore, NewChore},
  query::ChoreFilter,
  repository::HouseholdRepository,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{OutcomeResponse, error::ApiError, service::HouseholdService};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Case-insensitive text matched against title, description and assignee.
  #[serde(default)]
  pub q:      String,
  #[serde(default)]
  pub filter: ChoreFilter,
}

/// `GET /chores[?q=<text>][&filter=<filter>]`
pub async fn list<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Chore>>
where
  R: HouseholdRepository,
{
  let now = Utc::now();
  let chores = service
    .read(|h| {
      h.search_chores(&params.q, params.filter, now)
        .into_iter()
        .cloned()
        .collect()
    })
    .await;
  Json(chores)
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /chores/:id`
pub async fn get_one<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Chore>, ApiError>
where
  R: HouseholdRepository,
{
  service
    .read(|h| h.chore(id).cloned())
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("chore {id} not found")))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /chores`: returns 201 + the stored [`Chore`].
pub async fn create<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Json(body): Json<NewChore>,
) -> Result<impl IntoResponse, ApiError>
where
  R: HouseholdRepository,
{
  let chore = body.into_chore(Utc::now());
  let stored = chore.clone();
  service
    .mutate(|h| h.add_chore(chore))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /chores/:id`: replace the whole record.
pub async fn update<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
  Json(mut chore): Json<Chore>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  chore.id = id;
  let outcome = service
    .mutate(|h| h.update_chore(chore))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /chores/:id`
pub async fn delete_one<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let outcome = service
    .mutate(|h| h.delete_chore(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}

// ─── Toggle ───────────────────────────────────────────────────────────────────

/// `POST /chores/:id/toggle`
pub async fn toggle<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let outcome = service
    .mutate(|h| h.toggle_completion(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}

// ─── Clear completed ──────────────────────────────────────────────────────────

/// Which completed chores `clear-completed` removes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearScope {
  #[default]
  All,
  Weekly,
  Manual,
}

#[derive(Debug, Deserialize)]
pub struct ClearParams {
  #[serde(default)]
  pub scope: ClearScope,
}

/// `POST /chores/clear-completed[?scope=all|weekly|manual]`
pub async fn clear_completed<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Query(params): Query<ClearParams>,
) -> Result<Json<OutcomeResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let outcome = service
    .mutate(|h| match params.scope {
      ClearScope::All => h.clear_completed_chores(),
      ClearScope::Weekly => h.clear_completed_weekly_chores(),
      ClearScope::Manual => h.clear_completed_manual_chores(),
    })
    .await
    .map_err(ApiError::store)?;
  Ok(Json(OutcomeResponse { outcome }))
}
