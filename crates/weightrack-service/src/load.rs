//! Concurrent load harness.
//!
//! Every request is spawned on the tokio runtime up front; a semaphore keeps
//! at most `workers` of them in flight. The harness waits for all of them and
//! summarizes successes, failures, latency, and throughput.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use weightrack_core::error::{Result, Status, TrackerError};

use crate::config::LoadSection;
use crate::controller::{Controller, Payload};

/// Summary of one load run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub requests: usize,
    pub successes: usize,
    pub failures: usize,
    pub elapsed: Duration,
    pub avg_latency: Duration,
    pub max_latency: Duration,
    /// Requests per second over the whole run.
    pub throughput: f64,
}

impl LoadReport {
    pub fn success_ratio(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.successes as f64 / self.requests as f64
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "requests:    {}", self.requests)?;
        writeln!(f, "successes:   {}", self.successes)?;
        writeln!(f, "failures:    {}", self.failures)?;
        writeln!(f, "elapsed:     {} ms", self.elapsed.as_millis())?;
        writeln!(f, "throughput:  {:.2} req/s", self.throughput)?;
        writeln!(f, "avg latency: {:.2} ms", self.avg_latency.as_secs_f64() * 1000.0)?;
        write!(f, "max latency: {} ms", self.max_latency.as_millis())
    }
}

/// Run `requests` jobs with at most `workers` in flight.
///
/// `job(i)` resolves to `true` when request `i` observed the status its
/// scenario expects. A job that panics is counted as a failure.
pub async fn run<F, Fut>(workers: usize, requests: usize, job: F) -> Result<LoadReport>
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    if workers == 0 {
        return Err(TrackerError::Validation("workers must be at least 1".into()));
    }

    let permits = Arc::new(Semaphore::new(workers));
    let mut set = JoinSet::new();
    let started = Instant::now();

    for i in 0..requests {
        let permits = Arc::clone(&permits);
        let fut = job(i);
        set.spawn(async move {
            let _permit = permits.acquire_owned().await.ok()?;
            let t0 = Instant::now();
            let ok = fut.await;
            Some((ok, t0.elapsed()))
        });
    }

    let mut successes = 0usize;
    let mut failures = 0usize;
    let mut total_latency = Duration::ZERO;
    let mut max_latency = Duration::ZERO;
    let mut timed = 0u32;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Some((ok, latency))) => {
                if ok {
                    successes += 1;
                } else {
                    failures += 1;
                }
                total_latency += latency;
                max_latency = max_latency.max(latency);
                timed += 1;
            }
            Ok(None) => failures += 1,
            Err(e) => {
                tracing::warn!(error = %e, "load job aborted");
                failures += 1;
            }
        }
    }

    let elapsed = started.elapsed();
    let avg_latency = if timed == 0 { Duration::ZERO } else { total_latency / timed };
    let secs = elapsed.as_secs_f64();
    let throughput = if secs > 0.0 { requests as f64 / secs } else { 0.0 };

    Ok(LoadReport {
        requests,
        successes,
        failures,
        elapsed,
        avg_latency,
        max_latency,
        throughput,
    })
}

/// Concurrent sign-ups: `Usuario{i}` weighing `60 + i % 40`.
pub async fn signup_scenario(ctl: &Controller, load: &LoadSection) -> Result<LoadReport> {
    let ctl = ctl.clone();
    let report = run(load.workers, load.signups, move |i| {
        let ctl = ctl.clone();
        async move {
            let res = ctl.create(&format!("Usuario{i}"), 60.0 + (i % 40) as f64).await;
            res.status == Status::Created.code()
        }
    })
    .await?;

    tracing::info!(
        requests = report.requests,
        successes = report.successes,
        throughput = report.throughput,
        "signup load finished"
    );
    Ok(report)
}

/// Seed `update_users` records at 70.0, then hammer them with `updates`
/// concurrent updates requesting `60 + i % 50`.
pub async fn update_storm(ctl: &Controller, load: &LoadSection) -> Result<LoadReport> {
    if load.update_users == 0 {
        return Err(TrackerError::Validation("update_users must be at least 1".into()));
    }

    let mut ids = Vec::with_capacity(load.update_users);
    for i in 0..load.update_users {
        let res = ctl.create(&format!("TestUser{i}"), 70.0).await;
        match res.body {
            Payload::Created { id, .. } => ids.push(id),
            _ => {
                return Err(TrackerError::Internal(format!(
                    "seeding TestUser{i} failed with status {}",
                    res.status
                )))
            }
        }
    }
    let ids = Arc::new(ids);

    let ctl = ctl.clone();
    let report = run(load.update_workers, load.updates, move |i| {
        let ctl = ctl.clone();
        let ids = Arc::clone(&ids);
        async move {
            let id = &ids[i % ids.len()];
            let res = ctl.update(id, 60.0 + (i % 50) as f64).await;
            res.status == Status::Ok.code()
        }
    })
    .await?;

    tracing::info!(
        requests = report.requests,
        successes = report.successes,
        throughput = report.throughput,
        "update storm finished"
    );
    Ok(report)
}
