//! Parallel execution of remote sessions.
//!
//! One task per configured browser environment, bounded by a semaphore.
//! Sessions share nothing: each owns its remote browser, its article list,
//! and its word counts, so a failing session cannot touch another. Results
//! are collected per task and aggregated by the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use url::Url;

use crate::domain::SessionStatus;
use crate::driver::{capabilities, RemoteCapabilities, RemoteDriver};
use crate::session::SessionRunner;

pub const DEFAULT_WORKERS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Worker pool size (default: 5)
    pub workers: usize,

    /// Remote execution hub, without credentials
    pub hub_url: String,

    /// Browser environments to run, one session each
    pub sessions: Vec<RemoteCapabilities>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            hub_url: "https://hub-cloud.browserstack.com/wd/hub".to_string(),
            sessions: capabilities::default_fleet(),
        }
    }
}

pub struct FleetCoordinator {
    runner: Arc<SessionRunner>,
    semaphore: Arc<Semaphore>,
}

impl FleetCoordinator {
    pub fn new(runner: Arc<SessionRunner>) -> Self {
        Self::with_workers(runner, DEFAULT_WORKERS)
    }

    pub fn with_workers(runner: Arc<SessionRunner>, workers: usize) -> Self {
        Self {
            runner,
            semaphore: Arc::new(Semaphore::new(workers)),
        }
    }

    /// Run one session per environment, at most `workers` at a time.
    /// Returns (label, status) per session, in spawn order.
    pub async fn run(
        &self,
        hub: Url,
        sessions: Vec<RemoteCapabilities>,
    ) -> Vec<(String, SessionStatus)> {
        let mut handles = Vec::new();

        for caps in sessions {
            let runner = self.runner.clone();
            let semaphore = self.semaphore.clone();
            let hub = hub.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("Semaphore closed");
                let label = caps.label.clone();

                match RemoteDriver::connect(hub, &caps).await {
                    Ok(driver) => {
                        let result = runner.run(Box::new(driver), &label).await;
                        (label, result.status)
                    }
                    Err(e) => {
                        tracing::error!("[{label}] Could not create remote session: {e}");
                        (label, SessionStatus::Failed)
                    }
                }
            });

            handles.push(handle);
        }

        let mut results = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        results
    }
}
