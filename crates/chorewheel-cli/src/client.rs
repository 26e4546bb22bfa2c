//! Async HTTP client wrapping the chorewheel JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chorewheel_core::{
  Outcome,
  chore::{Chore, NewChore},
  member::{HouseholdMember, WeeklyChoreTemplate},
  query::Overview,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

/// Connection settings for the chorewheel API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// `GET /distribution` body.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionStatus {
  pub last_distribution: Option<DateTime<Utc>>,
  pub due:               bool,
}

/// `POST /distribution` body.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionResponse {
  pub outcome: Outcome,
  pub status:  DistributionStatus,
}

#[derive(Deserialize)]
struct OutcomeBody {
  outcome: Outcome,
}

/// Async HTTP client for the chorewheel JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Send `req` and decode a successful JSON body. Error bodies carry
  /// `{"error": "..."}`, which becomes the error message.
  async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| status.to_string());
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp.json().await.with_context(|| format!("deserialising {what} response"))
  }

  async fn outcome(&self, req: RequestBuilder, what: &str) -> Result<Outcome> {
    let body: OutcomeBody = self.send(req, what).await?;
    Ok(body.outcome)
  }

  // ── Chores ────────────────────────────────────────────────────────────────

  /// `GET /api/chores[?filter=<f>][&q=<text>]`
  pub async fn list_chores(
    &self,
    filter: Option<&str>,
    search: Option<&str>,
  ) -> Result<Vec<Chore>> {
    let mut req = self.client.get(self.url("/chores"));
    if let Some(filter) = filter {
      req = req.query(&[("filter", filter)]);
    }
    if let Some(text) = search {
      req = req.query(&[("q", text)]);
    }
    self.send(req, "GET /chores").await
  }

  /// `GET /api/chores/:id`
  pub async fn get_chore(&self, id: Uuid) -> Result<Chore> {
    let req = self.client.get(self.url(&format!("/chores/{id}")));
    self.send(req, "GET /chores/:id").await
  }

  /// `PUT /api/chores/:id`
  pub async fn update_chore(&self, chore: &Chore) -> Result<Outcome> {
    let req = self
      .client
      .put(self.url(&format!("/chores/{}", chore.id)))
      .json(chore);
    self.outcome(req, "PUT /chores/:id").await
  }

  /// `POST /api/chores`
  pub async fn create_chore(&self, chore: &NewChore) -> Result<Chore> {
    let req = self.client.post(self.url("/chores")).json(chore);
    self.send(req, "POST /chores").await
  }

  /// `POST /api/chores/:id/toggle`
  pub async fn toggle_chore(&self, id: Uuid) -> Result<Outcome> {
    let req = self.client.post(self.url(&format!("/chores/{id}/toggle")));
    self.outcome(req, "POST /chores/:id/toggle").await
  }

  /// `DELETE /api/chores/:id`
  pub async fn delete_chore(&self, id: Uuid) -> Result<Outcome> {
    let req = self.client.delete(self.url(&format!("/chores/{id}")));
    self.outcome(req, "DELETE /chores/:id").await
  }

  /// `POST /api/chores/clear-completed?scope=<s>`
  pub async fn clear_completed(&self, scope: &str) -> Result<Outcome> {
    let req = self
      .client
      .post(self.url("/chores/clear-completed"))
      .query(&[("scope", scope)]);
    self.outcome(req, "POST /chores/clear-completed").await
  }

  // ── Members ───────────────────────────────────────────────────────────────

  /// `GET /api/members[?active=true]`
  pub async fn list_members(&self, active_only: bool) -> Result<Vec<HouseholdMember>> {
    let req = self
      .client
      .get(self.url("/members"))
      .query(&[("active", active_only)]);
    self.send(req, "GET /members").await
  }

  /// `POST /api/members`
  pub async fn create_member(&self, name: &str, color: &str) -> Result<HouseholdMember> {
    let req = self
      .client
      .post(self.url("/members"))
      .json(&serde_json::json!({ "name": name, "color": color }));
    self.send(req, "POST /members").await
  }

  /// `PUT /api/members/:id`
  pub async fn update_member(&self, member: &HouseholdMember) -> Result<Outcome> {
    let req = self
      .client
      .put(self.url(&format!("/members/{}", member.id)))
      .json(member);
    self.outcome(req, "PUT /members/:id").await
  }

  /// `DELETE /api/members/:id`
  pub async fn remove_member(&self, id: Uuid) -> Result<Outcome> {
    let req = self.client.delete(self.url(&format!("/members/{id}")));
    self.outcome(req, "DELETE /members/:id").await
  }

  // ── Templates ─────────────────────────────────────────────────────────────

  /// `GET /api/templates`
  pub async fn list_templates(&self) -> Result<Vec<WeeklyChoreTemplate>> {
    self.send(self.client.get(self.url("/templates")), "GET /templates").await
  }

  /// `POST /api/templates`. The server assigns the id.
  pub async fn create_template(
    &self,
    template: &WeeklyChoreTemplate,
  ) -> Result<WeeklyChoreTemplate> {
    let req = self.client.post(self.url("/templates")).json(template);
    self.send(req, "POST /templates").await
  }

  /// `PUT /api/templates/:id`
  pub async fn update_template(&self, template: &WeeklyChoreTemplate) -> Result<Outcome> {
    let req = self
      .client
      .put(self.url(&format!("/templates/{}", template.id)))
      .json(template);
    self.outcome(req, "PUT /templates/:id").await
  }

  /// `DELETE /api/templates/:id`
  pub async fn remove_template(&self, id: Uuid) -> Result<Outcome> {
    let req = self.client.delete(self.url(&format!("/templates/{id}")));
    self.outcome(req, "DELETE /templates/:id").await
  }

  // ── Distribution ──────────────────────────────────────────────────────────

  /// `GET /api/distribution`
  pub async fn distribution_status(&self) -> Result<DistributionStatus> {
    self
      .send(self.client.get(self.url("/distribution")), "GET /distribution")
      .await
  }

  /// `POST /api/distribution[?force=true]`
  pub async fn distribute(&self, force: bool) -> Result<DistributionResponse> {
    let req = self
      .client
      .post(self.url("/distribution"))
      .query(&[("force", force)]);
    self.send(req, "POST /distribution").await
  }

  // ── Stats ─────────────────────────────────────────────────────────────────

  /// `GET /api/stats`
  pub async fn stats(&self) -> Result<Overview> {
    self.send(self.client.get(self.url("/stats")), "GET /stats").await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_api_prefix_without_double_slash() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:8080/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/chores"), "http://localhost:8080/api/chores");
  }
}
