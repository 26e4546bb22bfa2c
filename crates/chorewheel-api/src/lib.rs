//! JSON REST API for Chorewheel.
//!
//! Exposes an axum [`Router`] backed by a [`HouseholdService`] over any
//! [`HouseholdRepository`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", chorewheel_api::api_router(service.clone()))
//! ```

pub mod chores;
pub mod distribution;
pub mod error;
pub mod members;
pub mod service;
pub mod stats;
pub mod templates;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use chorewheel_core::{Outcome, repository::HouseholdRepository};
use serde::{Deserialize, Serialize};

pub use error::ApiError;
pub use service::HouseholdService;

/// Body returned by every mutation that may be a no-op.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeResponse {
  pub outcome: Outcome,
}

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R>(service: Arc<HouseholdService<R>>) -> Router<()>
where
  R: HouseholdRepository + 'static,
{
  Router::new()
    // Chores
    .route("/chores", get(chores::list::<R>).post(chores::create::<R>))
    .route("/chores/clear-completed", post(chores::clear_completed::<R>))
    .route(
      "/chores/{id}",
      get(chores::get_one::<R>)
        .put(chores::update::<R>)
        .delete(chores::delete_one::<R>),
    )
    .route("/chores/{id}/toggle", post(chores::toggle::<R>))
    // Members
    .route("/members", get(members::list::<R>).post(members::create::<R>))
    .route(
      "/members/{id}",
      put(members::update::<R>).delete(members::remove::<R>),
    )
    // Templates
    .route(
      "/templates",
      get(templates::list::<R>).post(templates::create::<R>),
    )
    .route(
      "/templates/{id}",
      put(templates::update::<R>).delete(templates::remove::<R>),
    )
    // Distribution
    .route(
      "/distribution",
      get(distribution::status::<R>).post(distribution::trigger::<R>),
    )
    // Aggregates
    .route("/stats", get(stats::overview::<R>))
    .route("/snapshot", get(stats::snapshot::<R>))
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chorewheel_core::{
    chore::Chore,
    member::{HouseholdMember, WeeklyChoreTemplate},
    query::Overview,
    repository::MemoryRepository,
    snapshot::HouseholdSnapshot,
  };
  use chorewheel_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use crate::distribution::{DistributionResponse, DistributionStatus};

  async fn make_service() -> Arc<HouseholdService<MemoryRepository>> {
    Arc::new(HouseholdService::open(MemoryRepository::new()).await.unwrap())
  }

  async fn oneshot_raw<R>(
    service: Arc<HouseholdService<R>>,
    method:  &str,
    uri:     &str,
    body:    Option<Value>,
  ) -> axum::response::Response
  where
    R: HouseholdRepository + 'static,
  {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(service).oneshot(req).await.unwrap()
  }

  async fn json_body<T: serde::de::DeserializeOwned>(
    resp: axum::response::Response,
  ) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn add_member<R: HouseholdRepository + 'static>(
    service: &Arc<HouseholdService<R>>,
    name: &str,
  ) -> HouseholdMember {
    let resp = oneshot_raw(
      service.clone(),
      "POST",
      "/members",
      Some(json!({ "name": name, "color": "#4A90D9" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  async fn add_chore<R: HouseholdRepository + 'static>(
    service: &Arc<HouseholdService<R>>,
    title: &str,
    assignee: &str,
  ) -> Chore {
    let resp = oneshot_raw(
      service.clone(),
      "POST",
      "/chores",
      Some(json!({
        "title": title,
        "assigned_to": assignee,
        "due_date": "2030-01-01T09:00:00Z",
        "category": "kitchen",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  // ── Chores ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_chore() {
    let service = make_service().await;
    let chore = add_chore(&service, "Wash Dishes", "John").await;
    assert!(!chore.is_weekly_chore);

    let resp = oneshot_raw(service, "GET", &format!("/chores/{}", chore.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Chore = json_body(resp).await;
    assert_eq!(fetched, chore);
  }

  #[tokio::test]
  async fn get_missing_chore_returns_404() {
    let service = make_service().await;
    let resp =
      oneshot_raw(service, "GET", &format!("/chores/{}", Uuid::new_v4()), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
  }

  #[tokio::test]
  async fn update_missing_chore_is_a_no_op() {
    let service = make_service().await;
    let ghost = Chore::new("Ghost", "Nobody", chrono::Utc::now());
    let resp = oneshot_raw(
      service.clone(),
      "PUT",
      &format!("/chores/{}", ghost.id),
      Some(serde_json::to_value(&ghost).unwrap()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::NoOpNotFound);
    assert!(service.read(|h| h.chores().is_empty()).await);
  }

  #[tokio::test]
  async fn update_uses_path_id() {
    let service = make_service().await;
    let chore = add_chore(&service, "Wash Dishes", "John").await;

    let mut edited = chore.clone();
    edited.id = Uuid::new_v4();
    edited.title = "Dry Dishes".into();
    let resp = oneshot_raw(
      service.clone(),
      "PUT",
      &format!("/chores/{}", chore.id),
      Some(serde_json::to_value(&edited).unwrap()),
    )
    .await;
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);

    let title = service.read(|h| h.chore(chore.id).map(|c| c.title.clone())).await;
    assert_eq!(title.as_deref(), Some("Dry Dishes"));
  }

  #[tokio::test]
  async fn toggle_filter_and_clear() {
    let service = make_service().await;
    let a = add_chore(&service, "Wash Dishes", "John").await;
    add_chore(&service, "Vacuum", "Sarah").await;

    let resp =
      oneshot_raw(service.clone(), "POST", &format!("/chores/{}/toggle", a.id), None).await;
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);

    let resp = oneshot_raw(service.clone(), "GET", "/chores?filter=completed", None).await;
    let completed: Vec<Chore> = json_body(resp).await;
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, a.id);

    let resp = oneshot_raw(service.clone(), "GET", "/chores?filter=pending", None).await;
    let pending: Vec<Chore> = json_body(resp).await;
    assert_eq!(pending.len(), 1);

    let resp = oneshot_raw(
      service.clone(),
      "POST",
      "/chores/clear-completed?scope=weekly",
      None,
    )
    .await;
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::NoOpNotFound);

    let resp =
      oneshot_raw(service.clone(), "POST", "/chores/clear-completed", None).await;
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);

    let resp = oneshot_raw(service, "GET", "/chores", None).await;
    let all: Vec<Chore> = json_body(resp).await;
    assert_eq!(all.len(), 1);
  }

  #[tokio::test]
  async fn search_text_narrows_filtered_list() {
    let service = make_service().await;
    let dishes = add_chore(&service, "Wash Dishes", "John").await;
    add_chore(&service, "Dry dishes", "Sarah").await;
    add_chore(&service, "Vacuum", "John").await;

    oneshot_raw(service.clone(), "POST", &format!("/chores/{}/toggle", dishes.id), None)
      .await;

    let resp = oneshot_raw(service.clone(), "GET", "/chores?q=DISHES", None).await;
    let hits: Vec<Chore> = json_body(resp).await;
    assert_eq!(hits.len(), 2);

    let resp =
      oneshot_raw(service.clone(), "GET", "/chores?q=dishes&filter=pending", None).await;
    let hits: Vec<Chore> = json_body(resp).await;
    let titles: Vec<_> = hits.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Dry dishes"]);

    let resp = oneshot_raw(service, "GET", "/chores?q=john", None).await;
    let hits: Vec<Chore> = json_body(resp).await;
    assert_eq!(hits.len(), 2);
  }

  #[tokio::test]
  async fn unknown_filter_is_rejected() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "GET", "/chores?filter=someday", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Members ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn removing_member_cascades_over_http() {
    let service = make_service().await;
    let mike = add_member(&service, "Mike").await;
    add_member(&service, "Emma").await;
    add_chore(&service, "Groceries", "Mike").await;
    add_chore(&service, "Laundry", "Emma").await;

    let resp =
      oneshot_raw(service.clone(), "DELETE", &format!("/members/{}", mike.id), None).await;
    let body: OutcomeResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);

    let resp = oneshot_raw(service.clone(), "GET", "/chores", None).await;
    let chores: Vec<Chore> = json_body(resp).await;
    assert_eq!(chores.len(), 1);
    assert_eq!(chores[0].assigned_to, "Emma");

    let resp = oneshot_raw(service, "GET", "/members", None).await;
    let members: Vec<HouseholdMember> = json_body(resp).await;
    assert_eq!(members.len(), 1);
  }

  #[tokio::test]
  async fn list_active_members() {
    let service = make_service().await;
    add_member(&service, "John").await;
    let resp = oneshot_raw(
      service.clone(),
      "POST",
      "/members",
      Some(json!({ "name": "Sarah", "is_active": false })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = oneshot_raw(service, "GET", "/members?active=true", None).await;
    let members: Vec<HouseholdMember> = json_body(resp).await;
    let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["John"]);
  }

  // ── Distribution ────────────────────────────────────────────────────────────

  async fn seed_rota(service: &Arc<HouseholdService<MemoryRepository>>) {
    for name in ["John", "Sarah", "Mike", "Emma"] {
      add_member(service, name).await;
    }
    for title in ["Kitchen", "Bathroom", "Floors", "Trash", "Windows", "Yard"] {
      let resp = oneshot_raw(
        service.clone(),
        "POST",
        "/templates",
        Some(json!({ "title": title, "category": "cleaning", "estimated_minutes": 30 })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }
  }

  #[tokio::test]
  async fn distribution_without_preconditions_is_a_no_op() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "POST", "/distribution?force=true", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DistributionResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::NoOpPreconditionUnmet);
    assert!(body.status.last_distribution.is_none());
    assert!(body.status.due);
  }

  #[tokio::test]
  async fn gated_and_forced_distribution() {
    let service = make_service().await;
    seed_rota(&service).await;

    let resp = oneshot_raw(service.clone(), "GET", "/distribution", None).await;
    let status: DistributionStatus = json_body(resp).await;
    assert!(status.due);

    let resp = oneshot_raw(service.clone(), "POST", "/distribution", None).await;
    let body: DistributionResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);
    assert!(!body.status.due);
    let first = body.status.last_distribution.expect("timestamp recorded");

    let resp = oneshot_raw(service.clone(), "GET", "/chores?filter=weekly", None).await;
    let weekly: Vec<Chore> = json_body(resp).await;
    let assignees: Vec<_> = weekly.iter().map(|c| c.assigned_to.as_str()).collect();
    assert_eq!(assignees, ["John", "Sarah", "Mike", "Emma", "John", "Sarah"]);

    // Closed gate: answered, not an error, and nothing changes.
    let resp = oneshot_raw(service.clone(), "POST", "/distribution", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DistributionResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::NoOpNotDue);
    assert_eq!(body.status.last_distribution, Some(first));

    // Forced: replaces the batch.
    let resp = oneshot_raw(service.clone(), "POST", "/distribution?force=true", None).await;
    let body: DistributionResponse = json_body(resp).await;
    assert_eq!(body.outcome, Outcome::Applied);

    let resp = oneshot_raw(service, "GET", "/chores?filter=weekly", None).await;
    let again: Vec<Chore> = json_body(resp).await;
    assert_eq!(again.len(), 6);
    assert!(again.iter().all(|c| weekly.iter().all(|w| w.id != c.id)));
  }

  // ── Aggregates ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn stats_and_snapshot() {
    let service = make_service().await;
    add_member(&service, "John").await;
    add_chore(&service, "Wash Dishes", "John").await;
    add_chore(&service, "Wipe Counters", "John").await;

    let resp = oneshot_raw(service.clone(), "GET", "/stats", None).await;
    let overview: Overview = json_body(resp).await;
    assert_eq!(overview.total, 2);
    assert_eq!(overview.pending, 2);
    assert_eq!(overview.categories.len(), 1);
    assert_eq!(overview.categories[0].label, "Kitchen");

    let resp = oneshot_raw(service, "GET", "/snapshot", None).await;
    let snapshot: HouseholdSnapshot = json_body(resp).await;
    assert_eq!(snapshot.chores.len(), 2);
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.templates.is_empty());
  }

  // ── Persistence ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn mutations_persist_through_sqlite() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let service = Arc::new(HouseholdService::open(store.clone()).await.unwrap());

    add_member(&service, "John").await;
    let resp = oneshot_raw(
      service.clone(),
      "POST",
      "/templates",
      Some(json!({ "title": "Mop floors" })),
    )
    .await;
    let template: WeeklyChoreTemplate = json_body(resp).await;
    assert_eq!(template.estimated_minutes, 0);

    oneshot_raw(service, "POST", "/distribution", None).await;

    let reopened = HouseholdService::open(store).await.unwrap();
    let (chores, templates, last) = reopened
      .read(|h| (h.chores().to_vec(), h.templates().len(), h.last_distribution()))
      .await;
    assert_eq!(templates, 1);
    assert_eq!(chores.len(), 1);
    assert_eq!(chores[0].title, "Mop floors");
    assert_eq!(chores[0].assigned_to, "John");
    assert!(last.is_some());
  }
}
