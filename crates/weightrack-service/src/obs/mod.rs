//! Lightweight in-process metrics.
//!
//! Operation counters and latency histograms are stored as atomics keyed by
//! label set and rendered in Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, HistogramVec, TrackerMetrics};
