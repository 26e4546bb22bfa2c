//! Read-only aggregate endpoints: `GET /stats` and `GET /snapshot`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chorewheel_core::{
  query::Overview,
  repository::HouseholdRepository,
  snapshot::HouseholdSnapshot,
};
use chrono::Utc;

use crate::service::HouseholdService;

/// `GET /stats`: totals plus non-empty category counts.
pub async fn overview<R>(
  State(service): State<Arc<HouseholdService<R>>>,
) -> Json<Overview>
where
  R: HouseholdRepository,
{
  let now = Utc::now();
  Json(service.read(|h| h.overview(now)).await)
}

/// `GET /snapshot`: the whole household in its persisted JSON layout.
pub async fn snapshot<R>(
  State(service): State<Arc<HouseholdService<R>>>,
) -> Json<HouseholdSnapshot>
where
  R: HouseholdRepository,
{
  Json(service.read(|h| h.snapshot()).await)
}
