//! `chorewheel`: command-line client for the chorewheel server.
//!
//! # Usage
//!
//! ```
//! chorewheel --url http://localhost:8080 chores --filter overdue
//! chorewheel --config ~/.config/chorewheel/cli.toml distribute
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chorewheel_core::{
  chore::{Category, Chore, NewChore, Priority},
  member::{HouseholdMember, WeeklyChoreTemplate},
};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "chorewheel", about = "Command-line client for the chorewheel server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the chorewheel server (default: http://localhost:8080).
  #[arg(long, env = "CHOREWHEEL_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List chores.
  Chores {
    /// all, pending, completed, overdue, weekly, completed_weekly or manual.
    #[arg(long)]
    filter: Option<String>,
    /// Case-insensitive text matched against title, description and assignee.
    #[arg(long)]
    search: Option<String>,
  },
  /// Add a manual chore.
  AddChore {
    title:       String,
    /// Display name of the assignee.
    #[arg(long)]
    assignee:    String,
    /// RFC 3339 due time (default: 24 hours from now).
    #[arg(long)]
    due:         Option<DateTime<Utc>>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "medium")]
    priority:    Priority,
    #[arg(long, default_value = "other")]
    category:    Category,
  },
  /// Change fields of an existing chore.
  UpdateChore {
    id:   Uuid,
    #[command(flatten)]
    edit: ChoreEdit,
  },
  /// Flip a chore between pending and completed.
  Toggle { id: Uuid },
  /// Delete a chore.
  DeleteChore { id: Uuid },
  /// Remove completed chores.
  ClearCompleted {
    /// all, weekly or manual.
    #[arg(long, default_value = "all")]
    scope: String,
  },
  /// List household members.
  Members {
    /// Only members in the weekly rotation.
    #[arg(long)]
    active: bool,
  },
  /// Add a household member.
  AddMember {
    name:  String,
    #[arg(long, default_value = "#4A90D9")]
    color: String,
  },
  /// Change a member's name, color or rotation status.
  UpdateMember {
    id:   Uuid,
    #[command(flatten)]
    edit: MemberEdit,
  },
  /// Remove a member and every chore assigned to their name.
  RemoveMember { id: Uuid },
  /// List weekly chore templates.
  Templates,
  /// Add a weekly chore template.
  AddTemplate {
    title:       String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "other")]
    category:    Category,
    #[arg(long, default_value_t = 30)]
    minutes:     u32,
    #[arg(long, default_value = "medium")]
    priority:    Priority,
  },
  /// Change fields of a weekly chore template.
  UpdateTemplate {
    id:   Uuid,
    #[command(flatten)]
    edit: TemplateEdit,
  },
  /// Delete a weekly chore template.
  RemoveTemplate { id: Uuid },
  /// Show when chores were last distributed and whether a run is due.
  Status,
  /// Distribute weekly chores across active members.
  Distribute {
    /// Run even if the last distribution was under a week ago.
    #[arg(long)]
    force: bool,
  },
  /// Show chore counts.
  Stats,
}

// ─── Edits ────────────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug, Default)]
struct ChoreEdit {
  #[arg(long)]
  title:       Option<String>,
  #[arg(long)]
  description: Option<String>,
  #[arg(long)]
  assignee:    Option<String>,
  /// RFC 3339 due time.
  #[arg(long)]
  due:         Option<DateTime<Utc>>,
  #[arg(long)]
  priority:    Option<Priority>,
  #[arg(long)]
  category:    Option<Category>,
}

impl ChoreEdit {
  fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.assignee.is_none()
      && self.due.is_none()
      && self.priority.is_none()
      && self.category.is_none()
  }

  fn apply(self, chore: &mut Chore) {
    if let Some(title) = self.title {
      chore.title = title;
    }
    if let Some(description) = self.description {
      chore.description = description;
    }
    if let Some(assignee) = self.assignee {
      chore.assigned_to = assignee;
    }
    if let Some(due) = self.due {
      chore.due_date = due;
    }
    if let Some(priority) = self.priority {
      chore.priority = priority;
    }
    if let Some(category) = self.category {
      chore.category = category;
    }
  }
}

#[derive(clap::Args, Debug, Default)]
struct MemberEdit {
  #[arg(long)]
  name:   Option<String>,
  #[arg(long)]
  color:  Option<String>,
  /// Whether the member takes part in weekly distribution.
  #[arg(long)]
  active: Option<bool>,
}

impl MemberEdit {
  fn is_empty(&self) -> bool {
    self.name.is_none() && self.color.is_none() && self.active.is_none()
  }

  fn apply(self, member: &mut HouseholdMember) {
    if let Some(name) = self.name {
      member.name = name;
    }
    if let Some(color) = self.color {
      member.color = color;
    }
    if let Some(active) = self.active {
      member.is_active = active;
    }
  }
}

#[derive(clap::Args, Debug, Default)]
struct TemplateEdit {
  #[arg(long)]
  title:       Option<String>,
  #[arg(long)]
  description: Option<String>,
  #[arg(long)]
  category:    Option<Category>,
  #[arg(long)]
  minutes:     Option<u32>,
  #[arg(long)]
  priority:    Option<Priority>,
}

impl TemplateEdit {
  fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.category.is_none()
      && self.minutes.is_none()
      && self.priority.is_none()
  }

  fn apply(self, template: &mut WeeklyChoreTemplate) {
    if let Some(title) = self.title {
      template.title = title;
    }
    if let Some(description) = self.description {
      template.description = description;
    }
    if let Some(category) = self.category {
      template.category = category;
    }
    if let Some(minutes) = self.minutes {
      template.estimated_minutes = minutes;
    }
    if let Some(priority) = self.priority {
      template.priority = priority;
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// CLI flag (or env) over config file over the default.
fn resolve_url(flag: Option<String>, file: &ConfigFile) -> String {
  flag
    .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let base_url = resolve_url(args.url, &file_cfg);
  tracing::debug!(%base_url, "using server");
  let client = ApiClient::new(ApiConfig { base_url })?;

  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  let now = Utc::now();
  match command {
    Command::Chores { filter, search } => {
      let chores = client
        .list_chores(filter.as_deref(), search.as_deref())
        .await?;
      if chores.is_empty() {
        println!("no chores");
      }
      for chore in &chores {
        println!("{}", render::chore_line(chore, now));
      }
    }
    Command::AddChore { title, assignee, due, description, priority, category } => {
      let new = NewChore {
        title,
        description,
        assigned_to: assignee,
        due_date: due.unwrap_or(now + TimeDelta::days(1)),
        priority,
        category,
        is_completed: false,
      };
      let chore = client.create_chore(&new).await?;
      println!("{}", render::chore_line(&chore, now));
    }
    Command::UpdateChore { id, edit } => {
      if edit.is_empty() {
        bail!("nothing to update");
      }
      let mut chore = client.get_chore(id).await?;
      edit.apply(&mut chore);
      println!("{}", render::outcome_message(client.update_chore(&chore).await?));
    }
    Command::Toggle { id } => {
      println!("{}", render::outcome_message(client.toggle_chore(id).await?));
    }
    Command::DeleteChore { id } => {
      println!("{}", render::outcome_message(client.delete_chore(id).await?));
    }
    Command::ClearCompleted { scope } => {
      println!("{}", render::outcome_message(client.clear_completed(&scope).await?));
    }
    Command::Members { active } => {
      for member in client.list_members(active).await? {
        println!("{}", render::member_line(&member));
      }
    }
    Command::AddMember { name, color } => {
      let member = client.create_member(&name, &color).await?;
      println!("{}", render::member_line(&member));
    }
    Command::UpdateMember { id, edit } => {
      if edit.is_empty() {
        bail!("nothing to update");
      }
      let mut member = client
        .list_members(false)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("member {id} not found"))?;
      edit.apply(&mut member);
      println!("{}", render::outcome_message(client.update_member(&member).await?));
      println!("{}", render::member_line(&member));
    }
    Command::RemoveMember { id } => {
      println!("{}", render::outcome_message(client.remove_member(id).await?));
    }
    Command::Templates => {
      for template in client.list_templates().await? {
        println!("{}", render::template_line(&template));
      }
    }
    Command::AddTemplate { title, description, category, minutes, priority } => {
      let mut template = WeeklyChoreTemplate::new(title, category);
      template.description = description;
      template.estimated_minutes = minutes;
      template.priority = priority;
      let stored = client.create_template(&template).await?;
      println!("{}", render::template_line(&stored));
    }
    Command::UpdateTemplate { id, edit } => {
      if edit.is_empty() {
        bail!("nothing to update");
      }
      let mut template = client
        .list_templates()
        .await?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("template {id} not found"))?;
      edit.apply(&mut template);
      println!("{}", render::outcome_message(client.update_template(&template).await?));
    }
    Command::RemoveTemplate { id } => {
      println!("{}", render::outcome_message(client.remove_template(id).await?));
    }
    Command::Status => {
      let status = client.distribution_status().await?;
      for line in render::status_lines(&status) {
        println!("{line}");
      }
    }
    Command::Distribute { force } => {
      let response = client.distribute(force).await?;
      println!("{}", render::outcome_message(response.outcome));
      for line in render::status_lines(&response.status) {
        println!("{line}");
      }
    }
    Command::Stats => {
      for line in render::overview_lines(&client.stats().await?) {
        println!("{line}");
      }
    }
  }
  Ok(())
}
