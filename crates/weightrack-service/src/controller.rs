//! Operation boundary for the tracker.
//!
//! Each operation validates, pauses through the configured [`Latency`], and
//! answers with an [`ApiResponse`]. Errors never escape: they are logged,
//! counted, and turned into a status code plus message.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use weightrack_core::error::{Result, Status, TrackerError};
use weightrack_core::{validate_measurement, RecordSnapshot};

use crate::latency::{Latency, Op};
use crate::obs::TrackerMetrics;
use crate::registry::{Registry, UpdateOutcome};

/// Before/after view returned by a successful update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateView {
    pub name: String,
    pub previous: f64,
    pub current: f64,
    pub requested: f64,
}

impl From<UpdateOutcome> for UpdateView {
    fn from(o: UpdateOutcome) -> Self {
        Self {
            name: o.name,
            previous: o.previous,
            current: o.current,
            requested: o.requested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Created { id: String, user: RecordSnapshot },
    Updated { user: UpdateView },
    Found { user: RecordSnapshot },
    Stats { total_users: usize },
    Error { error: String },
}

/// Structured result of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Payload,
    pub timestamp_ms: u64,
}

impl ApiResponse {
    fn new(status: Status, body: Payload) -> Self {
        Self {
            status: status.code(),
            body,
            timestamp_ms: now_ms(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error message, if this is an error response.
    pub fn error(&self) -> Option<&str> {
        match &self.body {
            Payload::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TrackerError::Internal(format!("encode response failed: {e}")))
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[derive(Clone)]
pub struct Controller {
    registry: Arc<Registry>,
    latency: Arc<dyn Latency>,
    metrics: Arc<TrackerMetrics>,
}

impl Controller {
    pub fn new(
        registry: Arc<Registry>,
        latency: Arc<dyn Latency>,
        metrics: Arc<TrackerMetrics>,
    ) -> Self {
        Self {
            registry,
            latency,
            metrics,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> &TrackerMetrics {
        &self.metrics
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn create(&self, name: &str, measurement: f64) -> ApiResponse {
        let started = Instant::now();
        let res = async {
            let (id, user) = self.registry.create(name, measurement)?;
            self.latency.pause(Op::Create).await?;
            Ok::<_, TrackerError>((Status::Created, Payload::Created { id, user }))
        }
        .await;
        self.finish(Op::Create, started, res)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn update(&self, id: &str, requested: f64) -> ApiResponse {
        let started = Instant::now();
        let res = async {
            if !self.registry.contains(id) {
                return Err(TrackerError::NotFound(format!("user not found: {id}")));
            }
            validate_measurement(requested)?;
            self.latency.pause(Op::Update).await?;

            let outcome = self.registry.update(id, requested)?;
            if outcome.current != requested {
                tracing::debug!(
                    %id,
                    requested,
                    current = outcome.current,
                    "stored measurement differs from requested"
                );
            }
            Ok::<_, TrackerError>((Status::Ok, Payload::Updated { user: outcome.into() }))
        }
        .await;
        self.finish(Op::Update, started, res)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn read(&self, id: &str) -> ApiResponse {
        let started = Instant::now();
        let res = async {
            if !self.registry.contains(id) {
                return Err(TrackerError::NotFound(format!("user not found: {id}")));
            }
            self.latency.pause(Op::Read).await?;
            let user = self.registry.get(id)?;
            Ok::<_, TrackerError>((Status::Ok, Payload::Found { user }))
        }
        .await;
        self.finish(Op::Read, started, res)
    }

    /// Registry size. Never delayed, never rejected.
    pub fn stats(&self) -> ApiResponse {
        let started = Instant::now();
        let total_users = self.registry.len();
        self.finish(Op::Stats, started, Ok((Status::Ok, Payload::Stats { total_users })))
    }

    fn finish(&self, op: Op, started: Instant, res: Result<(Status, Payload)>) -> ApiResponse {
        let (status, body) = match res {
            Ok(ok) => ok,
            Err(e) => {
                let status = e.status();
                if status == Status::Internal {
                    tracing::error!(op = op.as_str(), error = %e, "operation failed");
                } else {
                    tracing::warn!(op = op.as_str(), error = %e, "request rejected");
                }
                (status, Payload::Error { error: e.public_message() })
            }
        };

        self.metrics
            .requests
            .inc(&[("op", op.as_str()), ("status", status.as_str())]);
        self.metrics
            .op_duration
            .observe(&[("op", op.as_str())], started.elapsed());

        ApiResponse::new(status, body)
    }
}
