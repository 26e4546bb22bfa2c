//! The `HouseholdRepository` trait and an in-memory implementation.
//!
//! The household itself knows nothing about storage. Owners load a snapshot on
//! start and save one after each mutation that produced changes. Backends
//! (e.g. `chorewheel-store-sqlite`) implement this trait; the API layer
//! depends only on the abstraction.

use std::{
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

use crate::snapshot::HouseholdSnapshot;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a household persistence backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HouseholdRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the last saved state. Returns `None` if nothing was ever saved.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<HouseholdSnapshot>, Self::Error>> + Send + '_;

  /// Replace the stored state with `snapshot`.
  fn save<'a>(
    &'a self,
    snapshot: &'a HouseholdSnapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// Keeps the last saved snapshot in memory for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryRepository {
  saved: Mutex<Option<HouseholdSnapshot>>,
}

impl MemoryRepository {
  pub fn new() -> Self { Self::default() }

  /// Start from an existing snapshot, as if it had been saved.
  pub fn with_snapshot(snapshot: HouseholdSnapshot) -> Self {
    Self { saved: Mutex::new(Some(snapshot)) }
  }

  /// The last saved snapshot, if any.
  pub fn saved(&self) -> Option<HouseholdSnapshot> {
    self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

impl HouseholdRepository for MemoryRepository {
  type Error = Infallible;

  async fn load(&self) -> Result<Option<HouseholdSnapshot>, Infallible> {
    Ok(self.saved())
  }

  async fn save(&self, snapshot: &HouseholdSnapshot) -> Result<(), Infallible> {
    *self.saved.lock().unwrap_or_else(PoisonError::into_inner) =
      Some(snapshot.clone());
    Ok(())
  }
}
