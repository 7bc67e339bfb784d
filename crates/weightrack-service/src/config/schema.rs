use serde::Deserialize;
use weightrack_core::error::{Result, TrackerError};
use weightrack_core::UpdateMode;

const MAX_WORKERS: usize = 256;
const MAX_LATENCY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub latency: LatencySection,

    #[serde(default)]
    pub load: LoadSection,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            registry: RegistrySection::default(),
            latency: LatencySection::default(),
            load: LoadSection::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TrackerError::UnsupportedVersion);
        }
        self.registry.validate()?;
        self.latency.validate()?;
        self.load.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    #[serde(default)]
    pub update_mode: UpdateMode,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            update_mode: UpdateMode::default(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if self.id_prefix.trim().is_empty() {
            return Err(TrackerError::Validation(
                "registry.id_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_id_prefix() -> String {
    "user_".into()
}

/// Simulated datastore latency, per operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatencySection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_create_latency")]
    pub create: OpLatency,

    #[serde(default = "default_update_latency")]
    pub update: OpLatency,

    #[serde(default = "default_read_latency")]
    pub read: OpLatency,
}

impl Default for LatencySection {
    fn default() -> Self {
        Self {
            enabled: true,
            create: default_create_latency(),
            update: default_update_latency(),
            read: default_read_latency(),
        }
    }
}

impl LatencySection {
    pub fn validate(&self) -> Result<()> {
        for (op, lat) in [("create", self.create), ("update", self.update), ("read", self.read)] {
            if lat.base_ms.saturating_add(lat.jitter_ms) > MAX_LATENCY_MS {
                return Err(TrackerError::Validation(format!(
                    "latency.{op}: base_ms + jitter_ms must not exceed {MAX_LATENCY_MS}"
                )));
            }
        }
        Ok(())
    }
}

/// Sleep `base_ms` plus a uniform random extra in `[0, jitter_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpLatency {
    pub base_ms: u64,
    #[serde(default)]
    pub jitter_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_create_latency() -> OpLatency {
    OpLatency { base_ms: 50, jitter_ms: 100 }
}
fn default_update_latency() -> OpLatency {
    OpLatency { base_ms: 30, jitter_ms: 50 }
}
fn default_read_latency() -> OpLatency {
    OpLatency { base_ms: 20, jitter_ms: 30 }
}

/// Load-test scenario sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadSection {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_signups")]
    pub signups: usize,

    #[serde(default = "default_update_workers")]
    pub update_workers: usize,

    #[serde(default = "default_update_users")]
    pub update_users: usize,

    #[serde(default = "default_updates")]
    pub updates: usize,
}

impl Default for LoadSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            signups: default_signups(),
            update_workers: default_update_workers(),
            update_users: default_update_users(),
            updates: default_updates(),
        }
    }
}

impl LoadSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WORKERS).contains(&self.workers) {
            return Err(TrackerError::Validation(format!(
                "load.workers must be between 1 and {MAX_WORKERS}"
            )));
        }
        if !(1..=MAX_WORKERS).contains(&self.update_workers) {
            return Err(TrackerError::Validation(format!(
                "load.update_workers must be between 1 and {MAX_WORKERS}"
            )));
        }
        if self.signups == 0 || self.update_users == 0 || self.updates == 0 {
            return Err(TrackerError::Validation(
                "load.signups, load.update_users and load.updates must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_workers() -> usize {
    10
}
fn default_signups() -> usize {
    100
}
fn default_update_workers() -> usize {
    20
}
fn default_update_users() -> usize {
    50
}
fn default_updates() -> usize {
    200
}
