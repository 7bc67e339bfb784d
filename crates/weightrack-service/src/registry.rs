//! Concurrent record store keyed by generated ids.

use dashmap::DashMap;

use std::sync::atomic::{AtomicU64, Ordering};

use weightrack_core::error::{Result, TrackerError};
use weightrack_core::{validate_measurement, Record, RecordSnapshot, UpdateMode};

/// Result of a successful update: the measurement before and after.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub name: String,
    pub previous: f64,
    pub current: f64,
    pub requested: f64,
}

/// Record registry:
/// - `id -> Record`
/// - ids are `prefix + seq`, seq starting at 1
///
/// Entries are never removed.
pub struct Registry {
    records: DashMap<String, Record>,
    seq: AtomicU64,
    id_prefix: String,
    update_mode: UpdateMode,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new("user_", UpdateMode::default())
    }
}

impl Registry {
    pub fn new(id_prefix: impl Into<String>, update_mode: UpdateMode) -> Self {
        Self {
            records: DashMap::new(),
            seq: AtomicU64::new(1),
            id_prefix: id_prefix.into(),
            update_mode,
        }
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Id the registry would hand out for the `n`th create (1-based).
    pub fn id_for(&self, n: u64) -> String {
        format!("{}{}", self.id_prefix, n)
    }

    /// Validate, allocate an id, and store a new record.
    pub fn create(&self, name: &str, measurement: f64) -> Result<(String, RecordSnapshot)> {
        let record = Record::new(name, measurement)?;
        let snapshot = record.snapshot();

        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        let id = self.id_for(n);
        if self.records.insert(id.clone(), record).is_some() {
            return Err(TrackerError::Internal(format!("id collision: {id}")));
        }
        Ok((id, snapshot))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<RecordSnapshot> {
        self.records
            .get(id)
            .map(|r| r.value().snapshot())
            .ok_or_else(|| not_found(id))
    }

    /// Apply an update request under the configured mode.
    /// Unknown ids are reported before the requested value is checked.
    pub fn update(&self, id: &str, requested: f64) -> Result<UpdateOutcome> {
        let mut entry = self.records.get_mut(id).ok_or_else(|| not_found(id))?;
        validate_measurement(requested)?;

        let record = entry.value_mut();
        let previous = record.measurement();
        let current = record.proposed(requested, self.update_mode);
        if !current.is_finite() {
            return Err(TrackerError::Internal(format!(
                "update of {id} would store a non-finite measurement"
            )));
        }
        record.apply(requested, self.update_mode);

        Ok(UpdateOutcome {
            name: record.name().to_string(),
            previous,
            current,
            requested,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn not_found(id: &str) -> TrackerError {
    TrackerError::NotFound(format!("user not found: {id}"))
}
