//! HTTP server wiring for Chorewheel.
//!
//! Holds the runtime configuration and assembles the application router: the
//! JSON API from `chorewheel-api` mounted under `/api`, wrapped in request
//! tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use chorewheel_api::HouseholdService;
use chorewheel_core::{repository::HouseholdRepository, sample::sample_household};
use chrono::Utc;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `chorewheel.toml` and
/// `CHOREWHEEL_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Populate an empty household with demo members and chores on startup.
  pub seed_sample_data: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".to_string(),
      port:             8080,
      store_path:       PathBuf::from("chorewheel.db"),
      seed_sample_data: false,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `service`.
pub fn app<R>(service: Arc<HouseholdService<R>>) -> Router
where
  R: HouseholdRepository + 'static,
{
  Router::new()
    .nest("/api", chorewheel_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}

// ─── Startup helpers ──────────────────────────────────────────────────────────

/// Replace an empty household with the sample household, saving it and
/// broadcasting its additions.
///
/// Returns whether anything was seeded. A household that already holds any
/// chore, member, or template is left alone.
pub async fn seed_if_empty<R>(
  service: &HouseholdService<R>,
) -> Result<bool, R::Error>
where
  R: HouseholdRepository,
{
  let now = Utc::now();
  let seeded = service
    .mutate(|h| {
      if !h.is_empty() {
        return false;
      }
      *h = sample_household(now);
      true
    })
    .await?;
  if seeded {
    tracing::info!("seeded sample household");
  }
  Ok(seeded)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use chorewheel_core::{Change, chore::Chore, repository::MemoryRepository};
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn config_defaults_apply_to_missing_keys() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000)
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("chorewheel.db"));
    assert!(!cfg.seed_sample_data);
    assert_eq!(cfg.address(), "127.0.0.1:9000");
  }

  #[test]
  fn tilde_expands_only_as_prefix() {
    let plain = Path::new("/var/lib/chorewheel.db");
    assert_eq!(expand_tilde(plain), plain);

    let relative = Path::new("data/~/chorewheel.db");
    assert_eq!(expand_tilde(relative), relative);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let service =
      Arc::new(HouseholdService::open(MemoryRepository::new()).await.unwrap());

    let req = Request::builder().uri("/api/chores").body(Body::empty()).unwrap();
    let resp = app(service.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let chores: Vec<Chore> = serde_json::from_slice(&bytes).unwrap();
    assert!(chores.is_empty());

    let req = Request::builder().uri("/chores").body(Body::empty()).unwrap();
    let resp = app(service).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn seeding_fills_only_an_empty_household() {
    let service = HouseholdService::open(MemoryRepository::new()).await.unwrap();
    let mut events = service.subscribe();
    assert!(seed_if_empty(&service).await.unwrap());

    let mut added = 0;
    while let Ok(change) = events.try_recv() {
      assert!(matches!(change, Change::MemberAdded { .. } | Change::ChoreAdded { .. }));
      added += 1;
    }
    assert_eq!(added, 8);

    let saved = service.repository().saved().expect("seed is persisted");
    assert_eq!(saved.members.len(), 4);
    assert_eq!(saved.chores.len(), 4);

    assert!(!seed_if_empty(&service).await.unwrap());
    assert_eq!(service.read(|h| h.chores().len()).await, 4);
  }
}
