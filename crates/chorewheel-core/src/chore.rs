//! Chore types: the unit of work tracked by a household.
//!
//! A chore is either entered by hand or generated by a weekly distribution
//! run. Both kinds share one record shape; `is_weekly_chore` tells them apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator as _};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Priority ────────────────────────────────────────────────────────────────

/// How urgent a chore is.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

impl Priority {
  /// Parse a snake_case key such as `"high"`.
  pub fn from_key(key: &str) -> Result<Self> {
    key
      .parse()
      .map_err(|_| Error::UnknownPriority(key.to_owned()))
  }

  /// Human-readable label.
  pub fn label(self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
    }
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

/// The area of the house a chore belongs to.
///
/// Iteration order (via [`Category::all`]) is the declaration order and is the
/// order used for per-category statistics.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
  Cleaning,
  Kitchen,
  Bathroom,
  LivingRoom,
  Bedroom,
  Laundry,
  Cooking,
  Shopping,
  Maintenance,
  Outdoor,
  #[default]
  Other,
}

impl Category {
  /// Every category, in declaration order.
  pub fn all() -> impl Iterator<Item = Category> { Self::iter() }

  /// Parse a snake_case key such as `"living_room"`.
  pub fn from_key(key: &str) -> Result<Self> {
    key
      .parse()
      .map_err(|_| Error::UnknownCategory(key.to_owned()))
  }

  /// Human-readable label, e.g. `"Living Room"`.
  pub fn label(self) -> &'static str {
    match self {
      Self::Cleaning => "Cleaning",
      Self::Kitchen => "Kitchen",
      Self::Bathroom => "Bathroom",
      Self::LivingRoom => "Living Room",
      Self::Bedroom => "Bedroom",
      Self::Laundry => "Laundry",
      Self::Cooking => "Cooking",
      Self::Shopping => "Shopping",
      Self::Maintenance => "Maintenance",
      Self::Outdoor => "Outdoor",
      Self::Other => "Other",
    }
  }
}

// ─── Chore ───────────────────────────────────────────────────────────────────

/// A single chore. Updates replace the whole record, matched by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
  pub id:              Uuid,
  pub title:           String,
  pub description:     String,
  /// Display name of the assignee. Matched by exact string equality, not by
  /// member id.
  pub assigned_to:     String,
  pub due_date:        DateTime<Utc>,
  pub priority:        Priority,
  pub is_completed:    bool,
  pub category:        Category,
  pub created_at:      DateTime<Utc>,
  /// Set on chores produced by a weekly distribution run.
  #[serde(default)]
  pub is_weekly_chore: bool,
  /// Week-of-year stamped by the distribution run that created the chore.
  #[serde(default)]
  pub week_number:     Option<u32>,
}

impl Chore {
  /// Convenience constructor for a manual chore with a fresh id, medium
  /// priority, the `Other` category, and `created_at` set to now.
  pub fn new(
    title: impl Into<String>,
    assigned_to: impl Into<String>,
    due_date: DateTime<Utc>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: title.into(),
      description: String::new(),
      assigned_to: assigned_to.into(),
      due_date,
      priority: Priority::default(),
      is_completed: false,
      category: Category::default(),
      created_at: Utc::now(),
      is_weekly_chore: false,
      week_number: None,
    }
  }

  /// Not completed and due strictly before `now`.
  pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
    !self.is_completed && self.due_date < now
  }
}

// ─── NewChore ────────────────────────────────────────────────────────────────

/// Caller-supplied fields for a manually entered chore.
/// `id` and `created_at` are always assigned on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChore {
  pub title:        String,
  #[serde(default)]
  pub description:  String,
  pub assigned_to:  String,
  pub due_date:     DateTime<Utc>,
  #[serde(default)]
  pub priority:     Priority,
  #[serde(default)]
  pub category:     Category,
  #[serde(default)]
  pub is_completed: bool,
}

impl NewChore {
  /// Materialise a manual [`Chore`] created at `now`.
  pub fn into_chore(self, now: DateTime<Utc>) -> Chore {
    Chore {
      id:              Uuid::new_v4(),
      title:           self.title,
      description:     self.description,
      assigned_to:     self.assigned_to,
      due_date:        self.due_date,
      priority:        self.priority,
      is_completed:    self.is_completed,
      category:        self.category,
      created_at:      now,
      is_weekly_chore: false,
      week_number:     None,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use chrono::TimeDelta;

  use super::*;

  #[test]
  fn category_keys_are_snake_case() {
    assert_eq!(Category::LivingRoom.as_ref(), "living_room");
    assert_eq!(Category::from_str("living_room").unwrap(), Category::LivingRoom);
    assert_eq!(Category::from_key("outdoor").unwrap(), Category::Outdoor);
    assert!(Category::from_key("Living Room").is_err());
    assert_eq!(Priority::from_key("high").unwrap(), Priority::High);
    assert!(Priority::from_key("urgent").is_err());
    assert_eq!(
      serde_json::to_string(&Category::LivingRoom).unwrap(),
      "\"living_room\""
    );
    assert_eq!(Category::LivingRoom.label(), "Living Room");
  }

  #[test]
  fn category_iteration_follows_declaration_order() {
    let all: Vec<_> = Category::all().collect();
    assert_eq!(all.len(), 11);
    assert_eq!(all.first(), Some(&Category::Cleaning));
    assert_eq!(all.last(), Some(&Category::Other));
  }

  #[test]
  fn overdue_requires_pending_and_past_due() {
    let now = Utc::now();
    let mut chore = Chore::new("Mop", "Emma", now - TimeDelta::hours(1));
    assert!(chore.is_overdue(now));

    chore.is_completed = true;
    assert!(!chore.is_overdue(now));

    chore.is_completed = false;
    chore.due_date = now;
    assert!(!chore.is_overdue(now), "due exactly now is not overdue");
  }

  #[test]
  fn new_chore_is_manual() {
    let now = Utc::now();
    let chore = NewChore {
      title:        "Take out trash".into(),
      description:  String::new(),
      assigned_to:  "Mike".into(),
      due_date:     now,
      priority:     Priority::High,
      category:     Category::Kitchen,
      is_completed: false,
    }
    .into_chore(now);

    assert!(!chore.is_weekly_chore);
    assert_eq!(chore.week_number, None);
    assert_eq!(chore.created_at, now);
    assert_eq!(chore.priority, Priority::High);
  }
}
