//! The weekly distribution engine.
//!
//! Turns the household's templates and active members into one freshly
//! assigned chore per template. Everything here is pure calendar arithmetic;
//! [`crate::household::Household`] applies the result.
//!
//! Calendar math runs in whatever time zone the caller's `now` carries, so a
//! server can pass `Local::now()` and tests can pin a fixed `Utc` instant.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, TimeZone, Utc};
use uuid::Uuid;

use crate::{
  chore::Chore,
  member::{HouseholdMember, WeeklyChoreTemplate},
};

/// Minimum number of whole calendar days between two prompted distributions.
pub const CADENCE_DAYS: i64 = 7;

// ─── Calendar helpers ────────────────────────────────────────────────────────

/// Days from a weekday (Sunday = 1 … Saturday = 7) to the following Sunday.
///
/// Sunday maps to 7: the due date is always strictly in the future.
pub fn days_until_sunday(weekday_from_sunday: u32) -> u32 {
  7 - weekday_from_sunday + 1
}

/// The upcoming Sunday at the same local time of day as `now`.
pub fn next_sunday<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
  let days = u64::from(days_until_sunday(now.weekday().number_from_sunday()));
  now
    .clone()
    .checked_add_days(Days::new(days))
    // The same wall-clock time can fall into a DST gap; fall back to whole
    // 24-hour days.
    .unwrap_or_else(|| now.clone() + TimeDelta::days(days as i64))
}

/// Week-of-year with Sunday-first weeks where week 1 is the week containing
/// January 1st. Days in the last partial week of December belong to week 1 of
/// the next year.
pub fn week_of_year(date: NaiveDate) -> u32 {
  let weekday = date.weekday().num_days_from_sunday();

  let saturday = date.checked_add_days(Days::new(u64::from(6 - weekday)));
  if saturday.is_some_and(|s| s.year() != date.year()) {
    return 1;
  }

  let ordinal0 = date.ordinal0();
  let jan1_weekday = (weekday + 7 - ordinal0 % 7) % 7;
  (ordinal0 + jan1_weekday) / 7 + 1
}

/// Whole calendar days from `earlier` to `later`, truncated toward zero.
///
/// Counts date changes in the shared time zone and drops the last one when the
/// time of day has not yet caught up, so 6 days 23 hours is 6.
pub fn whole_days_between<Tz: TimeZone>(
  earlier: &DateTime<Tz>,
  later: &DateTime<Tz>,
) -> i64 {
  let mut days = (later.date_naive() - earlier.date_naive()).num_days();
  if days > 0 && later.time() < earlier.time() {
    days -= 1;
  } else if days < 0 && later.time() > earlier.time() {
    days += 1;
  }
  days
}

/// The cadence gate: whether a new distribution should be prompted at `now`.
pub fn should_distribute<Tz: TimeZone>(
  last_distribution: Option<DateTime<Utc>>,
  now: &DateTime<Tz>,
) -> bool {
  match last_distribution {
    None => true,
    Some(last) => {
      let last = last.with_timezone(&now.timezone());
      whole_days_between(&last, now) >= CADENCE_DAYS
    }
  }
}

// ─── Batch planning ──────────────────────────────────────────────────────────

/// The chores produced by one distribution run.
#[derive(Debug, Clone)]
pub struct WeeklyBatch {
  pub week_number: u32,
  pub chores:      Vec<Chore>,
}

/// Plan a weekly batch: template `i` goes to `active[i % active.len()]`.
///
/// Returns `None` when there are no templates or no active members.
pub fn plan_weekly_batch<Tz: TimeZone>(
  templates: &[WeeklyChoreTemplate],
  members: &[HouseholdMember],
  now: &DateTime<Tz>,
) -> Option<WeeklyBatch> {
  let active: Vec<&HouseholdMember> =
    members.iter().filter(|m| m.is_active).collect();
  if templates.is_empty() || active.is_empty() {
    return None;
  }

  let week_number = week_of_year(now.date_naive());
  let due_date = next_sunday(now).with_timezone(&Utc);
  let created_at = now.with_timezone(&Utc);

  let chores = templates
    .iter()
    .enumerate()
    .map(|(i, template)| Chore {
      id: Uuid::new_v4(),
      title: template.title.clone(),
      description: template.description.clone(),
      assigned_to: active[i % active.len()].name.clone(),
      due_date,
      priority: template.priority,
      is_completed: false,
      category: template.category,
      created_at,
      is_weekly_chore: true,
      week_number: Some(week_number),
    })
    .collect();

  Some(WeeklyBatch { week_number, chores })
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, Weekday};

  use super::*;
  use crate::chore::Category;

  // 2026-10-18 is a Sunday.
  fn sunday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
  }

  fn members(names: &[&str]) -> Vec<HouseholdMember> {
    names
      .iter()
      .map(|n| HouseholdMember::new(*n, "#888888"))
      .collect()
  }

  fn templates(n: usize) -> Vec<WeeklyChoreTemplate> {
    (0..n)
      .map(|i| WeeklyChoreTemplate::new(format!("Task {i}"), Category::Cleaning))
      .collect()
  }

  // ── Next Sunday ─────────────────────────────────────────────────────────────

  #[test]
  fn next_sunday_from_sunday_is_a_week_out() {
    let now = sunday();
    let due = next_sunday(&now);
    assert_eq!(due.weekday(), Weekday::Sun);
    assert_eq!(due - now, TimeDelta::days(7));
  }

  #[test]
  fn next_sunday_from_monday_and_saturday() {
    let monday = sunday() + TimeDelta::days(1);
    assert_eq!(next_sunday(&monday) - monday, TimeDelta::days(6));

    let saturday = sunday() - TimeDelta::days(1);
    assert_eq!(next_sunday(&saturday) - saturday, TimeDelta::days(1));
  }

  #[test]
  fn next_sunday_uses_the_callers_calendar() {
    // 23:00 Saturday UTC is already Sunday 01:00 at UTC+2.
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = Utc
      .with_ymd_and_hms(2026, 10, 17, 23, 0, 0)
      .unwrap()
      .with_timezone(&tz);
    assert_eq!(now.weekday(), Weekday::Sun);
    assert_eq!(next_sunday(&now) - now, TimeDelta::days(7));
  }

  #[test]
  fn days_until_sunday_covers_the_week() {
    let expected = [7, 6, 5, 4, 3, 2, 1];
    for (weekday, days) in (1..=7).zip(expected) {
      assert_eq!(days_until_sunday(weekday), days);
    }
  }

  // ── Week of year ────────────────────────────────────────────────────────────

  #[test]
  fn week_of_year_starts_on_sunday() {
    // 2026-01-01 is a Thursday.
    let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();
    assert_eq!(week_of_year(d(1, 1)), 1);
    assert_eq!(week_of_year(d(1, 3)), 1);
    assert_eq!(week_of_year(d(1, 4)), 2);
    assert_eq!(week_of_year(d(10, 17)), 42);
    assert_eq!(week_of_year(d(10, 18)), 43);
  }

  #[test]
  fn trailing_december_days_roll_into_week_one() {
    // 2026-12-27 is a Sunday; that week contains 2027-01-01.
    let d = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    assert_eq!(week_of_year(d), 1);
    let d = NaiveDate::from_ymd_opt(2026, 12, 26).unwrap();
    assert_eq!(week_of_year(d), 52);
  }

  // ── Cadence gate ────────────────────────────────────────────────────────────

  #[test]
  fn gate_open_without_prior_distribution() {
    assert!(should_distribute(None, &sunday()));
  }

  #[test]
  fn gate_opens_at_exactly_seven_days() {
    let now = sunday();
    assert!(!should_distribute(Some(now - TimeDelta::days(6)), &now));
    assert!(should_distribute(Some(now - TimeDelta::days(7)), &now));
    assert!(should_distribute(Some(now - TimeDelta::days(30)), &now));
  }

  #[test]
  fn gate_truncates_partial_days() {
    let now = sunday();
    let almost = now - TimeDelta::days(7) + TimeDelta::hours(1);
    assert_eq!(whole_days_between(&almost, &now), 6);
    assert!(!should_distribute(Some(almost), &now));
  }

  #[test]
  fn gate_closed_right_after_distribution() {
    let now = sunday();
    assert!(!should_distribute(Some(now), &now));
  }

  // ── Batch planning ──────────────────────────────────────────────────────────

  #[test]
  fn round_robin_six_templates_four_members() {
    let members = members(&["Ann", "Ben", "Cat", "Dan"]);
    let batch = plan_weekly_batch(&templates(6), &members, &sunday()).unwrap();

    let assignees: Vec<_> =
      batch.chores.iter().map(|c| c.assigned_to.as_str()).collect();
    assert_eq!(assignees, ["Ann", "Ben", "Cat", "Dan", "Ann", "Ben"]);
  }

  #[test]
  fn inactive_members_are_skipped_in_order() {
    let mut members = members(&["Ann", "Ben", "Cat"]);
    members[1].is_active = false;
    let batch = plan_weekly_batch(&templates(3), &members, &sunday()).unwrap();

    let assignees: Vec<_> =
      batch.chores.iter().map(|c| c.assigned_to.as_str()).collect();
    assert_eq!(assignees, ["Ann", "Cat", "Ann"]);
  }

  #[test]
  fn batch_copies_template_fields() {
    let mut template = WeeklyChoreTemplate::new("Mow lawn", Category::Outdoor);
    template.description = "Front and back".into();
    template.priority = crate::chore::Priority::High;
    template.estimated_minutes = 45;

    let now = sunday();
    let batch =
      plan_weekly_batch(&[template], &members(&["Ann"]), &now).unwrap();
    let chore = &batch.chores[0];

    assert_eq!(chore.title, "Mow lawn");
    assert_eq!(chore.description, "Front and back");
    assert_eq!(chore.category, Category::Outdoor);
    assert_eq!(chore.priority, crate::chore::Priority::High);
    assert!(chore.is_weekly_chore);
    assert!(!chore.is_completed);
    assert_eq!(chore.week_number, Some(43));
    assert_eq!(chore.created_at, now);
    assert_eq!(chore.due_date, now + TimeDelta::days(7));
  }

  #[test]
  fn no_batch_without_templates_or_active_members() {
    let now = sunday();
    assert!(plan_weekly_batch(&[], &members(&["Ann"]), &now).is_none());
    assert!(plan_weekly_batch(&templates(2), &[], &now).is_none());

    let mut idle = members(&["Ann"]);
    idle[0].is_active = false;
    assert!(plan_weekly_batch(&templates(2), &idle, &now).is_none());
  }
}
