//! The persisted shape of a household.
//!
//! Serialises as a single JSON object: three arrays of records, each carrying
//! its own `id`, and the distribution timestamp as a top-level scalar.
//! Timestamps are RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  chore::Chore,
  member::{HouseholdMember, WeeklyChoreTemplate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdSnapshot {
  #[serde(default)]
  pub chores:            Vec<Chore>,
  #[serde(default)]
  pub members:           Vec<HouseholdMember>,
  #[serde(default)]
  pub templates:         Vec<WeeklyChoreTemplate>,
  #[serde(default)]
  pub last_distribution: Option<DateTime<Utc>>,
}
