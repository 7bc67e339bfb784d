//! Shared application state for the tracker.
//!
//! Builds the registry, latency strategy, metrics, and controller from a
//! validated config. Startup errors are returned, not panicked.

use std::sync::Arc;

use weightrack_core::error::Result;

use crate::config::TrackerConfig;
use crate::controller::Controller;
use crate::latency::{JitterLatency, Latency, NoLatency};
use crate::obs::TrackerMetrics;
use crate::registry::Registry;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<TrackerConfig>,
    controller: Controller,
}

impl AppState {
    /// Build state with the latency strategy the config asks for.
    pub fn new(cfg: TrackerConfig) -> Result<Self> {
        let latency: Arc<dyn Latency> = if cfg.latency.enabled {
            Arc::new(JitterLatency::new(&cfg.latency))
        } else {
            Arc::new(NoLatency)
        };
        Self::with_latency(cfg, latency)
    }

    /// Build state with an injected latency strategy.
    pub fn with_latency(cfg: TrackerConfig, latency: Arc<dyn Latency>) -> Result<Self> {
        cfg.validate()?;

        let registry = Arc::new(Registry::new(
            cfg.registry.id_prefix.clone(),
            cfg.registry.update_mode,
        ));
        let metrics = Arc::new(TrackerMetrics::default());
        let controller = Controller::new(registry, latency, metrics);

        tracing::debug!(
            update_mode = ?cfg.registry.update_mode,
            latency = cfg.latency.enabled,
            "tracker state ready"
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            controller,
        })
    }

    pub fn cfg(&self) -> &TrackerConfig {
        &self.cfg
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}
