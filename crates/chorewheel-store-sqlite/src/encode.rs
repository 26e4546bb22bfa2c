//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enums are stored as their
//! snake_case keys. UUIDs are stored as hyphenated lowercase strings.

use chorewheel_core::{
  chore::{Category, Chore, Priority},
  member::{HouseholdMember, WeeklyChoreTemplate},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Integers ─────────────────────────────────────────────────────────────────

fn decode_u32(column: &'static str, value: i64) -> Result<u32> {
  u32::try_from(value).map_err(|_| Error::OutOfRange { column, value })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from or written to a `chores` row.
pub struct RawChore {
  pub position:        i64,
  pub chore_id:        String,
  pub title:           String,
  pub description:     String,
  pub assigned_to:     String,
  pub due_date:        String,
  pub priority:        String,
  pub is_completed:    bool,
  pub category:        String,
  pub created_at:      String,
  pub is_weekly_chore: bool,
  pub week_number:     Option<i64>,
}

impl RawChore {
  pub fn from_chore(position: usize, chore: &Chore) -> Self {
    Self {
      position:        position as i64,
      chore_id:        encode_uuid(chore.id),
      title:           chore.title.clone(),
      description:     chore.description.clone(),
      assigned_to:     chore.assigned_to.clone(),
      due_date:        encode_dt(chore.due_date),
      priority:        chore.priority.as_ref().to_owned(),
      is_completed:    chore.is_completed,
      category:        chore.category.as_ref().to_owned(),
      created_at:      encode_dt(chore.created_at),
      is_weekly_chore: chore.is_weekly_chore,
      week_number:     chore.week_number.map(i64::from),
    }
  }

  pub fn into_chore(self) -> Result<Chore> {
    Ok(Chore {
      id:              decode_uuid(&self.chore_id)?,
      title:           self.title,
      description:     self.description,
      assigned_to:     self.assigned_to,
      due_date:        decode_dt(&self.due_date)?,
      priority:        Priority::from_key(&self.priority)?,
      is_completed:    self.is_completed,
      category:        Category::from_key(&self.category)?,
      created_at:      decode_dt(&self.created_at)?,
      is_weekly_chore: self.is_weekly_chore,
      week_number:     self
        .week_number
        .map(|w| decode_u32("week_number", w))
        .transpose()?,
    })
  }
}

/// Raw values read from or written to a `members` row.
pub struct RawMember {
  pub position:  i64,
  pub member_id: String,
  pub name:      String,
  pub color:     String,
  pub is_active: bool,
}

impl RawMember {
  pub fn from_member(position: usize, member: &HouseholdMember) -> Self {
    Self {
      position:  position as i64,
      member_id: encode_uuid(member.id),
      name:      member.name.clone(),
      color:     member.color.clone(),
      is_active: member.is_active,
    }
  }

  pub fn into_member(self) -> Result<HouseholdMember> {
    Ok(HouseholdMember {
      id:        decode_uuid(&self.member_id)?,
      name:      self.name,
      color:     self.color,
      is_active: self.is_active,
    })
  }
}

/// Raw values read from or written to a `templates` row.
pub struct RawTemplate {
  pub position:          i64,
  pub template_id:       String,
  pub title:             String,
  pub description:       String,
  pub category:          String,
  pub estimated_minutes: i64,
  pub priority:          String,
}

impl RawTemplate {
  pub fn from_template(position: usize, template: &WeeklyChoreTemplate) -> Self {
    Self {
      position:          position as i64,
      template_id:       encode_uuid(template.id),
      title:             template.title.clone(),
      description:       template.description.clone(),
      category:          template.category.as_ref().to_owned(),
      estimated_minutes: i64::from(template.estimated_minutes),
      priority:          template.priority.as_ref().to_owned(),
    }
  }

  pub fn into_template(self) -> Result<WeeklyChoreTemplate> {
    Ok(WeeklyChoreTemplate {
      id:                decode_uuid(&self.template_id)?,
      title:             self.title,
      description:       self.description,
      category:          Category::from_key(&self.category)?,
      estimated_minutes: decode_u32("estimated_minutes", self.estimated_minutes)?,
      priority:          Priority::from_key(&self.priority)?,
    })
  }
}
