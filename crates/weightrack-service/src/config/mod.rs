//! Tracker configuration.
//!
//! YAML documents are decoded strictly (unknown keys are errors) and then
//! range-checked. A missing file is an internal error; a malformed or
//! out-of-range document is a validation error.

pub mod schema;

use std::fs;

use weightrack_core::error::{Result, TrackerError};

pub use schema::{LatencySection, LoadSection, OpLatency, RegistrySection, TrackerConfig};

/// Decode and validate a YAML document.
pub fn load_from_str(yaml: &str) -> Result<TrackerConfig> {
    let cfg: TrackerConfig = serde_yaml::from_str(yaml)
        .map_err(|e| TrackerError::Validation(format!("invalid tracker config: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<TrackerConfig> {
    let yaml = fs::read_to_string(path)
        .map_err(|e| TrackerError::Internal(format!("cannot read {path}: {e}")))?;
    load_from_str(&yaml)
}

/// Load `path` when given, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: Option<&str>) -> Result<TrackerConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => Ok(TrackerConfig::default()),
    }
}
