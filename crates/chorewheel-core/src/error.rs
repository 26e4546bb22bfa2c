//! Error types for `chorewheel-core`.
//!
//! Household mutations never fail; see [`crate::household::Outcome`]. These
//! errors cover parsing persisted or user-supplied keys.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown priority: {0:?}")]
  UnknownPriority(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
