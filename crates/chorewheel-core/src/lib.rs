//! Core types and logic for the Chorewheel household chore tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod chore;
pub mod distribution;
pub mod error;
pub mod household;
pub mod member;
pub mod query;
pub mod repository;
pub mod sample;
pub mod snapshot;

pub use error::{Error, Result};
pub use household::{Change, Household, Outcome};
