//! Household members and recurring chore templates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chore::{Category, Priority};

// ─── HouseholdMember ─────────────────────────────────────────────────────────

/// A person chores can be assigned to.
///
/// Chores reference members by `name`, so renaming a member leaves their
/// existing chores pointing at the old name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
  pub id:        Uuid,
  pub name:      String,
  /// Display color, e.g. `"#4A90D9"`.
  pub color:     String,
  /// Only active members take part in weekly distribution.
  pub is_active: bool,
}

impl HouseholdMember {
  /// A new active member with a fresh id.
  pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
    Self {
      id:        Uuid::new_v4(),
      name:      name.into(),
      color:     color.into(),
      is_active: true,
    }
  }
}

// ─── WeeklyChoreTemplate ─────────────────────────────────────────────────────

/// A recurring chore blueprint. Says what recurs; distribution decides when
/// and to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyChoreTemplate {
  pub id:                Uuid,
  pub title:             String,
  #[serde(default)]
  pub description:       String,
  #[serde(default)]
  pub category:          Category,
  /// Estimated duration in minutes.
  #[serde(default)]
  pub estimated_minutes: u32,
  #[serde(default)]
  pub priority:          Priority,
}

impl WeeklyChoreTemplate {
  pub fn new(title: impl Into<String>, category: Category) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: title.into(),
      description: String::new(),
      category,
      estimated_minutes: 0,
      priority: Priority::default(),
    }
  }
}
