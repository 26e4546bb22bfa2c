//! Serialized, persistent access to a [`Household`].
//!
//! Every mutation runs under one async mutex together with its save, so
//! multi-step operations (member cascade, weekly batch replacement) never
//! interleave with other writes. Applied changes are saved through the
//! repository and then broadcast to subscribers.

use chorewheel_core::{Change, Household, repository::HouseholdRepository};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

/// Capacity of the change broadcast channel. Slow subscribers see
/// `RecvError::Lagged` rather than blocking writers.
const EVENT_CAPACITY: usize = 256;

pub struct HouseholdService<R> {
  household: Mutex<Household>,
  repo:      R,
  events:    broadcast::Sender<Change>,
}

impl<R: HouseholdRepository> HouseholdService<R> {
  /// Load the household from `repo`, starting empty if nothing was saved.
  pub async fn open(repo: R) -> Result<Self, R::Error> {
    let household = match repo.load().await? {
      Some(snapshot) => {
        info!(
          chores = snapshot.chores.len(),
          members = snapshot.members.len(),
          templates = snapshot.templates.len(),
          "loaded household"
        );
        Household::from_snapshot(snapshot)
      }
      None => {
        info!("no saved household; starting empty");
        Household::new()
      }
    };
    Ok(Self::with_household(repo, household))
  }

  /// Wrap an already-built household. Nothing is saved until the first
  /// mutation.
  pub fn with_household(repo: R, household: Household) -> Self {
    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    Self { household: Mutex::new(household), repo, events }
  }

  pub fn repository(&self) -> &R { &self.repo }

  /// Receive every applied change from now on.
  pub fn subscribe(&self) -> broadcast::Receiver<Change> {
    self.events.subscribe()
  }

  /// Run a read-only projection against the current state.
  pub async fn read<T>(&self, f: impl FnOnce(&Household) -> T) -> T {
    let household = self.household.lock().await;
    f(&household)
  }

  /// Run a mutation, then save and broadcast if it changed anything.
  ///
  /// A failed save rolls the household back to its state before `f` ran,
  /// broadcasts nothing, and returns the repository error.
  pub async fn mutate<F, T>(&self, f: F) -> Result<T, R::Error>
  where
    F: FnOnce(&mut Household) -> T + Send,
    T: Send,
  {
    let mut household = self.household.lock().await;
    let before = household.snapshot();
    let out = f(&mut household);

    let changes = household.take_changes();
    if changes.is_empty() {
      return Ok(out);
    }

    if let Err(e) = self.repo.save(&household.snapshot()).await {
      warn!(error = %e, changes = changes.len(), "save failed; rolling back");
      *household = Household::from_snapshot(before);
      return Err(e);
    }
    debug!(changes = changes.len(), "persisted household");

    for change in changes {
      // No subscribers is fine.
      let _ = self.events.send(change);
    }
    Ok(out)
  }
}
