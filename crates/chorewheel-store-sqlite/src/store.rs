//! The SQLite implementation of [`HouseholdRepository`]: [`SqliteStore`].

use std::path::Path;

use chorewheel_core::{repository::HouseholdRepository, snapshot::HouseholdSnapshot};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  Result,
  encode::{RawChore, RawMember, RawTemplate, decode_dt, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A household store backed by a single SQLite file.
///
/// Each save replaces the whole household in one transaction.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Everything read by one `load` call, before decoding.
struct RawHousehold {
  last_distribution: Option<String>,
  chores:            Vec<RawChore>,
  members:           Vec<RawMember>,
  templates:         Vec<RawTemplate>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HouseholdRepository impl ────────────────────────────────────────────────

impl HouseholdRepository for SqliteStore {
  type Error = crate::Error;

  async fn load(&self) -> Result<Option<HouseholdSnapshot>> {
    let raw: Option<RawHousehold> = self
      .conn
      .call(|conn| {
        let last_distribution: Option<Option<String>> = conn
          .query_row(
            "SELECT last_distribution FROM household WHERE singleton = 1",
            [],
            |row| row.get(0),
          )
          .optional()?;

        let Some(last_distribution) = last_distribution else {
          return Ok(None);
        };

        let chores = conn
          .prepare(
            "SELECT position, chore_id, title, description, assigned_to,
                    due_date, priority, is_completed, category, created_at,
                    is_weekly_chore, week_number
             FROM chores ORDER BY position",
          )?
          .query_map([], |row| {
            Ok(RawChore {
              position:        row.get(0)?,
              chore_id:        row.get(1)?,
              title:           row.get(2)?,
              description:     row.get(3)?,
              assigned_to:     row.get(4)?,
              due_date:        row.get(5)?,
              priority:        row.get(6)?,
              is_completed:    row.get(7)?,
              category:        row.get(8)?,
              created_at:      row.get(9)?,
              is_weekly_chore: row.get(10)?,
              week_number:     row.get(11)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let members = conn
          .prepare(
            "SELECT position, member_id, name, color, is_active
             FROM members ORDER BY position",
          )?
          .query_map([], |row| {
            Ok(RawMember {
              position:  row.get(0)?,
              member_id: row.get(1)?,
              name:      row.get(2)?,
              color:     row.get(3)?,
              is_active: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let templates = conn
          .prepare(
            "SELECT position, template_id, title, description, category,
                    estimated_minutes, priority
             FROM templates ORDER BY position",
          )?
          .query_map([], |row| {
            Ok(RawTemplate {
              position:          row.get(0)?,
              template_id:       row.get(1)?,
              title:             row.get(2)?,
              description:       row.get(3)?,
              category:          row.get(4)?,
              estimated_minutes: row.get(5)?,
              priority:          row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(RawHousehold { last_distribution, chores, members, templates }))
      })
      .await?;

    let Some(raw) = raw else {
      return Ok(None);
    };

    Ok(Some(HouseholdSnapshot {
      chores:            raw
        .chores
        .into_iter()
        .map(RawChore::into_chore)
        .collect::<Result<_>>()?,
      members:           raw
        .members
        .into_iter()
        .map(RawMember::into_member)
        .collect::<Result<_>>()?,
      templates:         raw
        .templates
        .into_iter()
        .map(RawTemplate::into_template)
        .collect::<Result<_>>()?,
      last_distribution: raw.last_distribution.as_deref().map(decode_dt).transpose()?,
    }))
  }

  async fn save(&self, snapshot: &HouseholdSnapshot) -> Result<()> {
    let chores: Vec<RawChore> = snapshot
      .chores
      .iter()
      .enumerate()
      .map(|(i, c)| RawChore::from_chore(i, c))
      .collect();
    let members: Vec<RawMember> = snapshot
      .members
      .iter()
      .enumerate()
      .map(|(i, m)| RawMember::from_member(i, m))
      .collect();
    let templates: Vec<RawTemplate> = snapshot
      .templates
      .iter()
      .enumerate()
      .map(|(i, t)| RawTemplate::from_template(i, t))
      .collect();
    let last_distribution = snapshot.last_distribution.map(encode_dt);
    let saved_at = encode_dt(Utc::now());

    let counts = (chores.len(), members.len(), templates.len());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM chores; DELETE FROM members; DELETE FROM templates;",
        )?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO chores (
               position, chore_id, title, description, assigned_to,
               due_date, priority, is_completed, category, created_at,
               is_weekly_chore, week_number
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          )?;
          for c in &chores {
            stmt.execute(rusqlite::params![
              c.position,
              c.chore_id,
              c.title,
              c.description,
              c.assigned_to,
              c.due_date,
              c.priority,
              c.is_completed,
              c.category,
              c.created_at,
              c.is_weekly_chore,
              c.week_number,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO members (position, member_id, name, color, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for m in &members {
            stmt.execute(rusqlite::params![
              m.position,
              m.member_id,
              m.name,
              m.color,
              m.is_active,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO templates (
               position, template_id, title, description, category,
               estimated_minutes, priority
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          )?;
          for t in &templates {
            stmt.execute(rusqlite::params![
              t.position,
              t.template_id,
              t.title,
              t.description,
              t.category,
              t.estimated_minutes,
              t.priority,
            ])?;
          }
        }

        tx.execute(
          "INSERT INTO household (singleton, last_distribution, saved_at)
           VALUES (1, ?1, ?2)
           ON CONFLICT (singleton) DO UPDATE SET
             last_distribution = excluded.last_distribution,
             saved_at          = excluded.saved_at",
          rusqlite::params![last_distribution, saved_at],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(
      chores = counts.0,
      members = counts.1,
      templates = counts.2,
      "saved household"
    );
    Ok(())
  }
}
