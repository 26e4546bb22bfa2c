//! Plain-text rendering of API results for the terminal.

use chorewheel_core::{
  Outcome,
  chore::Chore,
  member::{HouseholdMember, WeeklyChoreTemplate},
  query::Overview,
};
use chrono::{DateTime, Local, Utc};

use crate::client::DistributionStatus;

pub fn chore_line(chore: &Chore, now: DateTime<Utc>) -> String {
  let mark = if chore.is_completed { "x" } else { " " };
  let mut tags = Vec::new();
  if chore.is_weekly_chore {
    match chore.week_number {
      Some(week) => tags.push(format!("weekly wk{week}")),
      None => tags.push("weekly".to_string()),
    }
  }
  if chore.is_overdue(now) {
    tags.push("overdue".to_string());
  }
  let tags = if tags.is_empty() {
    String::new()
  } else {
    format!(" ({})", tags.join(", "))
  };

  format!(
    "[{mark}] {id}  {title} → {who}  due {due}  {priority}/{category}{tags}",
    id = chore.id,
    title = chore.title,
    who = chore.assigned_to,
    due = chore.due_date.with_timezone(&Local).format("%a %b %-d %H:%M"),
    priority = chore.priority.label(),
    category = chore.category.label(),
  )
}

pub fn member_line(member: &HouseholdMember) -> String {
  let state = if member.is_active { "" } else { " (inactive)" };
  format!("{}  {} {}{state}", member.id, member.name, member.color)
}

pub fn template_line(template: &WeeklyChoreTemplate) -> String {
  format!(
    "{}  {}  {} min  {}/{}",
    template.id,
    template.title,
    template.estimated_minutes,
    template.priority.label(),
    template.category.label(),
  )
}

pub fn outcome_message(outcome: Outcome) -> &'static str {
  match outcome {
    Outcome::Applied => "done",
    Outcome::NoOpNotFound => "nothing to do: not found",
    Outcome::NoOpPreconditionUnmet => {
      "nothing to do: need at least one active member and one template"
    }
    Outcome::NoOpNotDue => "nothing to do: last distribution was under a week ago",
  }
}

pub fn status_lines(status: &DistributionStatus) -> Vec<String> {
  let last = match status.last_distribution {
    Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    None => "never".to_string(),
  };
  vec![
    format!("last distribution: {last}"),
    format!("due: {}", if status.due { "yes" } else { "no" }),
  ]
}

pub fn overview_lines(overview: &Overview) -> Vec<String> {
  let mut lines = vec![format!(
    "{} chores: {} completed, {} pending, {} overdue",
    overview.total, overview.completed, overview.pending, overview.overdue
  )];
  for count in &overview.categories {
    lines.push(format!("  {:<12} {}", count.label, count.count));
  }
  lines
}
