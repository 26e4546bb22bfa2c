//! Demo data for an empty household.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
  chore::{Category, Chore, Priority},
  household::Household,
  member::HouseholdMember,
};

/// A household with four members and four chores due within the next day.
/// "Do Laundry" starts out completed. The additions stay queued as
/// [`Change`](crate::Change)s for the owner to drain.
pub fn sample_household(now: DateTime<Utc>) -> Household {
  let mut household = Household::new();

  for (name, color) in [
    ("John", "#4A90D9"),
    ("Sarah", "#E94E77"),
    ("Mike", "#50C878"),
    ("Emma", "#F5A623"),
  ] {
    household.add_member(HouseholdMember::new(name, color));
  }

  let chores = [
    (
      "Wash Dishes",
      "Clean all dishes in the sink",
      "John",
      TimeDelta::hours(1),
      Priority::Medium,
      Category::Kitchen,
      false,
    ),
    (
      "Vacuum Living Room",
      "Vacuum the entire living room area",
      "Sarah",
      TimeDelta::hours(2),
      Priority::High,
      Category::LivingRoom,
      false,
    ),
    (
      "Grocery Shopping",
      "Buy groceries for the week",
      "Mike",
      TimeDelta::hours(24),
      Priority::High,
      Category::Shopping,
      false,
    ),
    (
      "Do Laundry",
      "Wash and fold clothes",
      "Emma",
      TimeDelta::hours(12),
      Priority::Medium,
      Category::Laundry,
      true,
    ),
  ];

  for (title, description, assignee, due_in, priority, category, done) in chores {
    let mut chore = Chore::new(title, assignee, now + due_in);
    chore.description = description.to_owned();
    chore.priority = priority;
    chore.category = category;
    chore.is_completed = done;
    chore.created_at = now;
    household.add_chore(chore);
  }

  household
}
