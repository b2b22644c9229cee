use std::sync::Arc;

use crate::app::{AppContext, PrensaError, Result};
use crate::config::Credentials;
use crate::domain::SessionStatus;
use crate::driver::ChromeDriver;
use crate::fleet::FleetCoordinator;

/// One session against a local Chrome. A failed session is a failed command.
pub async fn run_local(ctx: &AppContext, headed: bool) -> Result<()> {
    println!("Starting local session...");

    let headless = ctx.config.scrape.headless && !headed;
    let driver = ChromeDriver::launch(headless).await?;
    let result = ctx.runner().run(Box::new(driver), "Local").await;

    match result.status {
        SessionStatus::Passed => {
            println!("Local session passed");
            Ok(())
        }
        SessionStatus::Failed => Err(PrensaError::Session(
            result
                .reason
                .unwrap_or_else(|| "session failed".to_string()),
        )),
    }
}

/// All configured remote sessions in parallel. Individual failures are
/// reported in the summary, not propagated.
pub async fn run_fleet(ctx: &AppContext, workers: Option<usize>) -> Result<()> {
    let sessions = ctx.config.fleet.sessions.clone();
    if sessions.is_empty() {
        println!("No fleet sessions configured");
        return Ok(());
    }

    let credentials = Credentials::from_env().map_err(|e| PrensaError::Config(e.to_string()))?;
    let hub = credentials
        .hub_url(&ctx.config.fleet.hub_url)
        .map_err(|e| PrensaError::Config(e.to_string()))?;

    let workers = workers.unwrap_or(ctx.config.fleet.workers);
    println!(
        "Running {} remote sessions with {} workers...",
        sessions.len(),
        workers
    );

    let coordinator = FleetCoordinator::with_workers(Arc::new(ctx.runner()), workers);
    let results = coordinator.run(hub, sessions).await;

    let mut passed = 0;
    let mut failed = 0;
    for (label, status) in &results {
        match status {
            SessionStatus::Passed => {
                passed += 1;
                println!("  + {label}");
            }
            SessionStatus::Failed => {
                failed += 1;
                println!("  ! {label}");
            }
        }
    }
    println!("Fleet complete: {passed} passed, {failed} failed");

    Ok(())
}

/// The original end-to-end flow: local first, then the fleet. A local
/// failure is reported but does not block the fleet.
pub async fn run_all(ctx: &AppContext, headed: bool, workers: Option<usize>) -> Result<()> {
    if let Err(e) = run_local(ctx, headed).await {
        eprintln!("[!] Local session failed: {e}");
    }
    run_fleet(ctx, workers).await
}
