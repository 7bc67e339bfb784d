//! The tracked record and its update semantics.
//!
//! `Record::update` carries the known defect: it ignores the requested value
//! and subtracts [`DEFECT_DECREMENT`] from the stored measurement. The
//! corrected behavior lives in `Record::replace` and is selected through
//! [`UpdateMode`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Amount the defective update subtracts, whatever value was requested.
pub const DEFECT_DECREMENT: f64 = 1.0;

/// How an update request is applied to a stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Reproduce the shipped behavior: subtract a constant.
    #[default]
    Defective,
    /// Assign the requested measurement.
    Replace,
}

/// A named measurement (name + weight).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    measurement: f64,
}

/// Point-in-time copy of a record, safe to hand out of the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSnapshot {
    pub name: String,
    pub measurement: f64,
}

impl Record {
    /// Build a record, rejecting a blank name or a non-positive measurement.
    pub fn new(name: impl Into<String>, measurement: f64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TrackerError::Validation("name is required".into()));
        }
        validate_measurement(measurement)?;
        Ok(Self { name, measurement })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn measurement(&self) -> f64 {
        self.measurement
    }

    /// Update the measurement.
    ///
    /// Known defect: `_requested` is ignored and the current measurement is
    /// decremented by [`DEFECT_DECREMENT`].
    pub fn update(&mut self, _requested: f64) {
        self.measurement -= DEFECT_DECREMENT;
    }

    /// Assign the requested measurement.
    pub fn replace(&mut self, requested: f64) {
        self.measurement = requested;
    }

    /// Measurement an update request would leave behind, without applying it.
    pub fn proposed(&self, requested: f64, mode: UpdateMode) -> f64 {
        match mode {
            UpdateMode::Defective => self.measurement - DEFECT_DECREMENT,
            UpdateMode::Replace => requested,
        }
    }

    /// Route an update request through the configured mode.
    pub fn apply(&mut self, requested: f64, mode: UpdateMode) {
        match mode {
            UpdateMode::Defective => self.update(requested),
            UpdateMode::Replace => self.replace(requested),
        }
    }

    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            name: self.name.clone(),
            measurement: self.measurement,
        }
    }
}

/// Measurements must be finite and strictly positive.
pub fn validate_measurement(measurement: f64) -> Result<()> {
    if measurement.is_finite() && measurement > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::Validation("measurement must be greater than 0".into()))
    }
}
