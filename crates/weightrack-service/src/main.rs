//! weightrack demo
//!
//! - Walks one record through two updates and reports what was stored
//! - Runs the sign-up and update load scenarios
//! - Prints the collected metrics
//!
//! Usage: `weightrack-service [config.yaml]`. Without a path the built-in
//! defaults are used. Log level comes from `RUST_LOG`.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use weightrack_core::error::Result;
use weightrack_service::app_state::AppState;
use weightrack_service::config;
use weightrack_service::controller::{Controller, Payload};
use weightrack_service::load;

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "weightrack failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1);
    let cfg = config::load_or_default(path.as_deref())?;
    let state = AppState::new(cfg)?;
    let ctl = state.controller();

    tracing::info!(update_mode = ?ctl.registry().update_mode(), "weightrack starting");

    walkthrough(ctl).await;

    let signups = load::signup_scenario(ctl, &state.cfg().load).await?;
    println!("\n== sign-up load ==\n{signups}");

    let updates = load::update_storm(ctl, &state.cfg().load).await?;
    println!("\n== update storm ==\n{updates}");

    println!("\n== metrics ==\n{}", ctl.metrics().render());
    Ok(())
}

/// Create one record and update it twice, showing requested vs stored.
async fn walkthrough(ctl: &Controller) {
    let created = ctl.create("Juan Pérez", 70.5).await;
    let Payload::Created { id, user } = created.body else {
        tracing::error!(status = created.status, "walkthrough create failed");
        return;
    };
    println!("created {id}: {} at {} kg", user.name, user.measurement);

    for requested in [75.0, 80.0] {
        let res = ctl.update(&id, requested).await;
        match res.body {
            Payload::Updated { user } => {
                println!(
                    "update to {requested} kg: stored {} kg (was {} kg, off by {} kg)",
                    user.current,
                    user.previous,
                    requested - user.current
                );
            }
            other => tracing::warn!(status = res.status, body = ?other, "walkthrough update failed"),
        }
    }
}
