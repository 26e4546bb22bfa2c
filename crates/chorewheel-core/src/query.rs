//! Read-side projections over a [`Household`].
//!
//! Nothing is cached; every call walks the current collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  chore::{Category, Chore},
  household::Household,
  member::HouseholdMember,
};

/// Named chore views, as accepted by `GET /chores?filter=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoreFilter {
  #[default]
  All,
  Pending,
  Completed,
  Overdue,
  Weekly,
  CompletedWeekly,
  Manual,
}

impl ChoreFilter {
  pub fn matches(self, chore: &Chore, now: DateTime<Utc>) -> bool {
    match self {
      Self::All => true,
      Self::Pending => !chore.is_completed,
      Self::Completed => chore.is_completed,
      Self::Overdue => chore.is_overdue(now),
      Self::Weekly => chore.is_weekly_chore,
      Self::CompletedWeekly => chore.is_weekly_chore && chore.is_completed,
      Self::Manual => !chore.is_weekly_chore,
    }
  }
}

/// Headline numbers plus the non-empty categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
  pub total:      usize,
  pub completed:  usize,
  pub pending:    usize,
  pub overdue:    usize,
  pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
  pub category: Category,
  pub label:    String,
  pub count:    usize,
}

impl Household {
  /// Chores matching `filter`, in stored order.
  pub fn filter_chores(&self, filter: ChoreFilter, now: DateTime<Utc>) -> Vec<&Chore> {
    self
      .chores()
      .iter()
      .filter(|c| filter.matches(c, now))
      .collect()
  }

  /// Chores whose title, description or assignee contains `text`
  /// (case-insensitive) and that match `filter`, in stored order. Empty
  /// `text` matches every chore.
  pub fn search_chores(
    &self,
    text: &str,
    filter: ChoreFilter,
    now: DateTime<Utc>,
  ) -> Vec<&Chore> {
    let needle = text.to_lowercase();
    self
      .chores()
      .iter()
      .filter(|c| needle.is_empty() || mentions(c, &needle))
      .filter(|c| filter.matches(c, now))
      .collect()
  }

  pub fn pending(&self) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::Pending, Utc::now())
  }

  pub fn completed(&self) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::Completed, Utc::now())
  }

  /// Pending chores due strictly before `now`.
  pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::Overdue, now)
  }

  pub fn weekly(&self) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::Weekly, Utc::now())
  }

  pub fn completed_weekly(&self) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::CompletedWeekly, Utc::now())
  }

  pub fn manual(&self) -> Vec<&Chore> {
    self.filter_chores(ChoreFilter::Manual, Utc::now())
  }

  pub fn active_members(&self) -> Vec<&HouseholdMember> {
    self.members().iter().filter(|m| m.is_active).collect()
  }

  /// Chore count for every category, zero counts included.
  pub fn category_counts(&self) -> Vec<(Category, usize)> {
    Category::all()
      .map(|cat| {
        let n = self.chores().iter().filter(|c| c.category == cat).count();
        (cat, n)
      })
      .collect()
  }

  pub fn overview(&self, now: DateTime<Utc>) -> Overview {
    let chores = self.chores();
    let completed = chores.iter().filter(|c| c.is_completed).count();
    Overview {
      total: chores.len(),
      completed,
      pending: chores.len() - completed,
      overdue: chores.iter().filter(|c| c.is_overdue(now)).count(),
      categories: self
        .category_counts()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| CategoryCount {
          category,
          label: category.label().to_owned(),
          count,
        })
        .collect(),
    }
  }
}

/// `needle` must already be lowercase.
fn mentions(chore: &Chore, needle: &str) -> bool {
  [&chore.title, &chore.description, &chore.assigned_to]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}
