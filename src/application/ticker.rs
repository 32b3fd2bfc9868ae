//! Periodic Background Tasks
//!
//! Cancelable interval loops bound to the lifetime of their owner. The
//! returned [`TickerHandle`] stops the task on `stop()` and aborts it on drop,
//! so a task never outlives the view or session that started it.

use std::time::Duration;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TickError {
    #[error("Tick failed: {0}")]
    Failed(String),
}

/// Work run once per period
#[async_trait]
pub trait PeriodicTask: Send + 'static {
    /// Get the name of this task (for logging)
    fn name(&self) -> &str;

    /// Run one tick. Errors are logged; the loop keeps going.
    async fn tick(&mut self) -> Result<(), TickError>;
}

/// Owner handle for a running periodic task
#[derive(Debug)]
pub struct TickerHandle {
    name: String,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Signal shutdown and wait for the loop to exit
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Ticker '{}' ended abnormally: {}", self.name, e);
                }
            }
        }
        debug!("Ticker '{}' stopped", self.name);
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Ticker '{}' aborted on drop", self.name);
        }
    }
}

/// Spawn `task` to run every `period`, first tick one period from now
pub fn spawn_periodic<T: PeriodicTask>(mut task: T, period: Duration) -> TickerHandle {
    let name = task.name().to_string();
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let loop_name = name.clone();
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = task.tick().await {
                        warn!("Ticker '{}' tick error: {}", loop_name, e);
                    }
                }
            }
        }
    });

    debug!("Ticker '{}' started with period {:?}", name, period);

    TickerHandle {
        name,
        shutdown_tx,
        task: Some(handle),
    }
}
