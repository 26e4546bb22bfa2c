//! The owned in-memory entity store.
//!
//! Holds chores, members, templates and the distribution timestamp. Mutators
//! never fail: a missing id is reported through [`Outcome`] and otherwise
//! ignored. Applied mutations are recorded as [`Change`] events that the
//! owner drains with [`Household::take_changes`].

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  chore::Chore,
  distribution::{plan_weekly_batch, should_distribute},
  member::{HouseholdMember, WeeklyChoreTemplate},
  snapshot::HouseholdSnapshot,
};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What a mutation did. Ignoring it gives the lenient behavior callers can
/// always rely on: no-ops leave the household untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Applied,
  /// The referenced record does not exist (or nothing matched a bulk clear).
  NoOpNotFound,
  /// Distribution needs at least one template and one active member.
  NoOpPreconditionUnmet,
  /// Gated distribution declined because the cadence gate is closed.
  NoOpNotDue,
}

impl Outcome {
  pub fn is_applied(self) -> bool { matches!(self, Self::Applied) }

  fn applied_if(applied: bool) -> Self {
    if applied { Self::Applied } else { Self::NoOpNotFound }
  }
}

// ─── Change ──────────────────────────────────────────────────────────────────

/// An applied mutation, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
  ChoreAdded { id: Uuid },
  ChoreUpdated { id: Uuid },
  ChoreCompletionToggled { id: Uuid, is_completed: bool },
  ChoresRemoved { ids: Vec<Uuid> },
  MemberAdded { id: Uuid },
  MemberUpdated { id: Uuid },
  MemberRemoved { id: Uuid, cascaded: Vec<Uuid> },
  TemplateAdded { id: Uuid },
  TemplateUpdated { id: Uuid },
  TemplateRemoved { id: Uuid },
  WeeklyBatchDistributed {
    week_number: u32,
    created:     Vec<Uuid>,
    replaced:    Vec<Uuid>,
  },
}

// ─── Household ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Household {
  chores:            Vec<Chore>,
  members:           Vec<HouseholdMember>,
  templates:         Vec<WeeklyChoreTemplate>,
  last_distribution: Option<DateTime<Utc>>,
  changes:           Vec<Change>,
}

impl Household {
  pub fn new() -> Self { Self::default() }

  /// Rebuild a household from persisted state. No changes are recorded.
  pub fn from_snapshot(snapshot: HouseholdSnapshot) -> Self {
    Self {
      chores:            snapshot.chores,
      members:           snapshot.members,
      templates:         snapshot.templates,
      last_distribution: snapshot.last_distribution,
      changes:           Vec::new(),
    }
  }

  /// A copy of the current state, suitable for persistence.
  pub fn snapshot(&self) -> HouseholdSnapshot {
    HouseholdSnapshot {
      chores:            self.chores.clone(),
      members:           self.members.clone(),
      templates:         self.templates.clone(),
      last_distribution: self.last_distribution,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.chores.is_empty() && self.members.is_empty() && self.templates.is_empty()
  }

  /// Drain the changes recorded since the last call.
  pub fn take_changes(&mut self) -> Vec<Change> {
    std::mem::take(&mut self.changes)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn chores(&self) -> &[Chore] { &self.chores }

  pub fn members(&self) -> &[HouseholdMember] { &self.members }

  pub fn templates(&self) -> &[WeeklyChoreTemplate] { &self.templates }

  pub fn last_distribution(&self) -> Option<DateTime<Utc>> {
    self.last_distribution
  }

  pub fn chore(&self, id: Uuid) -> Option<&Chore> {
    self.chores.iter().find(|c| c.id == id)
  }

  pub fn member(&self, id: Uuid) -> Option<&HouseholdMember> {
    self.members.iter().find(|m| m.id == id)
  }

  pub fn template(&self, id: Uuid) -> Option<&WeeklyChoreTemplate> {
    self.templates.iter().find(|t| t.id == id)
  }

  // ── Chores ────────────────────────────────────────────────────────────────

  /// Append a chore. Ids are not checked for uniqueness.
  pub fn add_chore(&mut self, chore: Chore) -> Outcome {
    self.changes.push(Change::ChoreAdded { id: chore.id });
    self.chores.push(chore);
    Outcome::Applied
  }

  /// Replace the chore with the same id as `chore`.
  pub fn update_chore(&mut self, chore: Chore) -> Outcome {
    let Some(slot) = self.chores.iter_mut().find(|c| c.id == chore.id) else {
      debug!(id = %chore.id, "update_chore: no such chore");
      return Outcome::NoOpNotFound;
    };
    self.changes.push(Change::ChoreUpdated { id: chore.id });
    *slot = chore;
    Outcome::Applied
  }

  pub fn delete_chore(&mut self, id: Uuid) -> Outcome {
    let removed = self.remove_chores_where(|c| c.id == id);
    Outcome::applied_if(!removed.is_empty())
  }

  pub fn toggle_completion(&mut self, id: Uuid) -> Outcome {
    let Some(chore) = self.chores.iter_mut().find(|c| c.id == id) else {
      debug!(%id, "toggle_completion: no such chore");
      return Outcome::NoOpNotFound;
    };
    chore.is_completed = !chore.is_completed;
    self.changes.push(Change::ChoreCompletionToggled {
      id,
      is_completed: chore.is_completed,
    });
    Outcome::Applied
  }

  /// Delete every completed chore, weekly or manual.
  pub fn clear_completed_chores(&mut self) -> Outcome {
    let removed = self.remove_chores_where(|c| c.is_completed);
    Outcome::applied_if(!removed.is_empty())
  }

  pub fn clear_completed_weekly_chores(&mut self) -> Outcome {
    let removed = self.remove_chores_where(|c| c.is_completed && c.is_weekly_chore);
    Outcome::applied_if(!removed.is_empty())
  }

  pub fn clear_completed_manual_chores(&mut self) -> Outcome {
    let removed =
      self.remove_chores_where(|c| c.is_completed && !c.is_weekly_chore);
    Outcome::applied_if(!removed.is_empty())
  }

  /// Remove matching chores, record a `ChoresRemoved` change when any were
  /// removed, and return their ids.
  fn remove_chores_where(&mut self, pred: impl Fn(&Chore) -> bool) -> Vec<Uuid> {
    let ids = self.extract_chores(pred);
    if !ids.is_empty() {
      self.changes.push(Change::ChoresRemoved { ids: ids.clone() });
    }
    ids
  }

  /// Remove matching chores without recording a change.
  fn extract_chores(&mut self, pred: impl Fn(&Chore) -> bool) -> Vec<Uuid> {
    let mut ids = Vec::new();
    self.chores.retain(|c| {
      if pred(c) {
        ids.push(c.id);
        false
      } else {
        true
      }
    });
    ids
  }

  // ── Members ───────────────────────────────────────────────────────────────

  pub fn add_member(&mut self, member: HouseholdMember) -> Outcome {
    self.changes.push(Change::MemberAdded { id: member.id });
    self.members.push(member);
    Outcome::Applied
  }

  pub fn update_member(&mut self, member: HouseholdMember) -> Outcome {
    let Some(slot) = self.members.iter_mut().find(|m| m.id == member.id) else {
      debug!(id = %member.id, "update_member: no such member");
      return Outcome::NoOpNotFound;
    };
    self.changes.push(Change::MemberUpdated { id: member.id });
    *slot = member;
    Outcome::Applied
  }

  /// Remove a member and every chore assigned to their name (exact,
  /// case-sensitive match).
  pub fn remove_member(&mut self, id: Uuid) -> Outcome {
    let Some(pos) = self.members.iter().position(|m| m.id == id) else {
      debug!(%id, "remove_member: no such member");
      return Outcome::NoOpNotFound;
    };
    let member = self.members.remove(pos);
    let cascaded = self.extract_chores(|c| c.assigned_to == member.name);
    info!(
      member = %member.name,
      chores = cascaded.len(),
      "removed household member"
    );
    self.changes.push(Change::MemberRemoved { id, cascaded });
    Outcome::Applied
  }

  // ── Templates ─────────────────────────────────────────────────────────────

  pub fn add_template(&mut self, template: WeeklyChoreTemplate) -> Outcome {
    self.changes.push(Change::TemplateAdded { id: template.id });
    self.templates.push(template);
    Outcome::Applied
  }

  pub fn update_template(&mut self, template: WeeklyChoreTemplate) -> Outcome {
    let Some(slot) = self.templates.iter_mut().find(|t| t.id == template.id)
    else {
      debug!(id = %template.id, "update_template: no such template");
      return Outcome::NoOpNotFound;
    };
    self.changes.push(Change::TemplateUpdated { id: template.id });
    *slot = template;
    Outcome::Applied
  }

  pub fn remove_template(&mut self, id: Uuid) -> Outcome {
    let before = self.templates.len();
    self.templates.retain(|t| t.id != id);
    if self.templates.len() == before {
      debug!(%id, "remove_template: no such template");
      return Outcome::NoOpNotFound;
    }
    self.changes.push(Change::TemplateRemoved { id });
    Outcome::Applied
  }

  // ── Distribution ──────────────────────────────────────────────────────────

  /// Whether a distribution should be prompted at `now`.
  pub fn should_distribute<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
    should_distribute(self.last_distribution, now)
  }

  /// Replace the weekly batch with a fresh one, regardless of the cadence
  /// gate. Completed weekly chores are discarded along with pending ones.
  pub fn distribute_weekly_chores<Tz: TimeZone>(
    &mut self,
    now: &DateTime<Tz>,
  ) -> Outcome {
    let Some(batch) = plan_weekly_batch(&self.templates, &self.members, now)
    else {
      debug!(
        members = self.members.len(),
        templates = self.templates.len(),
        "distribution preconditions unmet"
      );
      return Outcome::NoOpPreconditionUnmet;
    };

    let replaced = self.extract_chores(|c| c.is_weekly_chore);
    let created: Vec<Uuid> = batch.chores.iter().map(|c| c.id).collect();
    self.chores.extend(batch.chores);
    self.last_distribution = Some(now.with_timezone(&Utc));

    info!(
      week = batch.week_number,
      created = created.len(),
      replaced = replaced.len(),
      "distributed weekly chores"
    );
    self.changes.push(Change::WeeklyBatchDistributed {
      week_number: batch.week_number,
      created,
      replaced,
    });
    Outcome::Applied
  }

  /// Distribute only when the cadence gate is open.
  pub fn distribute_if_due<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Outcome {
    if !self.should_distribute(now) {
      debug!("distribution not due");
      return Outcome::NoOpNotDue;
    }
    self.distribute_weekly_chores(now)
  }
}
