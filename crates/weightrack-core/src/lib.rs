//! weightrack core: the tracked record, its update semantics, and the error surface.
//!
//! This crate defines the data model and error taxonomy shared by the service
//! layer and the load-test tooling. It carries no runtime or storage
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TrackerError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod record;

/// Shared result type.
pub use error::{Result, Status, TrackerError};
pub use record::{validate_measurement, Record, RecordSnapshot, UpdateMode, DEFECT_DECREMENT};
