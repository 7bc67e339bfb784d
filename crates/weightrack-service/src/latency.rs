//! Simulated datastore latency.
//!
//! Controller operations pause through a [`Latency`] strategy before
//! answering. Tests inject [`NoLatency`]; the demo uses [`JitterLatency`].

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use weightrack_core::error::Result;

use crate::config::{LatencySection, OpLatency};

/// Operation being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Update,
    Read,
    Stats,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Create => "create",
            Op::Update => "update",
            Op::Read => "read",
            Op::Stats => "stats",
        }
    }
}

/// Pause strategy applied by the controller. An error aborts the operation
/// with an internal failure.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn pause(&self, op: Op) -> Result<()>;
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self, _op: Op) -> Result<()> {
        Ok(())
    }
}

/// Sleeps a base duration plus uniform random jitter, per operation.
#[derive(Debug, Clone)]
pub struct JitterLatency {
    create: OpLatency,
    update: OpLatency,
    read: OpLatency,
}

impl JitterLatency {
    pub fn new(cfg: &LatencySection) -> Self {
        Self {
            create: cfg.create,
            update: cfg.update,
            read: cfg.read,
        }
    }

    /// Draw the delay for one call of `op`. Stats are never delayed.
    pub fn sample(&self, op: Op) -> Duration {
        let cfg = match op {
            Op::Create => self.create,
            Op::Update => self.update,
            Op::Read => self.read,
            Op::Stats => return Duration::ZERO,
        };
        let jitter = if cfg.jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..cfg.jitter_ms)
        };
        Duration::from_millis(cfg.base_ms.saturating_add(jitter))
    }
}

#[async_trait]
impl Latency for JitterLatency {
    async fn pause(&self, op: Op) -> Result<()> {
        let d = self.sample(op);
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
        Ok(())
    }
}
