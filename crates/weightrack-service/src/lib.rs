//! weightrack service library entry.
//!
//! This crate wires the registry, latency strategies, controller, metrics, and
//! load harness into a working tracker. It is consumed by the demo binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod controller;
pub mod latency;
pub mod load;
pub mod obs;
pub mod registry;
