//! Handlers for `/distribution`.
//!
//! `GET` reports the cadence gate; `POST` runs a distribution. Without
//! `?force=true` the run only happens when the gate is open, and a closed gate
//! is answered with a `no_op_not_due` outcome rather than an error.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chorewheel_core::{Household, Outcome, repository::HouseholdRepository};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, service::HouseholdService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionStatus {
  pub last_distribution: Option<DateTime<Utc>>,
  /// Whether the cadence gate is open.
  pub due:               bool,
}

impl DistributionStatus {
  fn of(household: &Household, now: &DateTime<Local>) -> Self {
    Self {
      last_distribution: household.last_distribution(),
      due:               household.should_distribute(now),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistributionResponse {
  pub outcome: Outcome,
  pub status:  DistributionStatus,
}

/// `GET /distribution`
pub async fn status<R>(
  State(service): State<Arc<HouseholdService<R>>>,
) -> Json<DistributionStatus>
where
  R: HouseholdRepository,
{
  let now = Local::now();
  Json(service.read(|h| DistributionStatus::of(h, &now)).await)
}

#[derive(Debug, Deserialize)]
pub struct TriggerParams {
  #[serde(default)]
  pub force: bool,
}

/// `POST /distribution[?force=true]`
pub async fn trigger<R>(
  State(service): State<Arc<HouseholdService<R>>>,
  Query(params): Query<TriggerParams>,
) -> Result<Json<DistributionResponse>, ApiError>
where
  R: HouseholdRepository,
{
  let now = Local::now();
  let response = service
    .mutate(|h| {
      let outcome = if params.force {
        h.distribute_weekly_chores(&now)
      } else {
        h.distribute_if_due(&now)
      };
      DistributionResponse { outcome, status: DistributionStatus::of(h, &now) }
    })
    .await
    .map_err(ApiError::store)?;
  Ok(Json(response))
}
