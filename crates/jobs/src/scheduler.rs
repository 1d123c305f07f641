//! Periodic news refresh.
//!
//! One background task owns the ticker, so ticks never overlap: a slow
//! refresh delays the next tick instead of running alongside it. The first
//! tick fires immediately on start.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::news::NewsRefresher;

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Result of a single scheduled refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Refreshed { articles: usize, is_fallback: bool },
    /// No provider configured; the cache was left untouched.
    Skipped,
    Failed { reason: String },
}

pub struct NewsScheduler {
    refresher: NewsRefresher,
    period: Duration,
}

impl NewsScheduler {
    /// Refresh every TTL period.
    pub fn new(refresher: NewsRefresher) -> Self {
        let period = refresher.ttl();
        Self::with_period(refresher, period)
    }

    pub fn with_period(refresher: NewsRefresher, period: Duration) -> Self {
        Self { refresher, period: period.max(MIN_PERIOD) }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run one refresh. Failures are logged and never escape.
    pub async fn tick(&self) -> TickOutcome {
        if !self.refresher.has_source() {
            warn!("news provider not configured, skipping scheduled refresh");
            return TickOutcome::Skipped;
        }

        match self.refresher.refresh().await {
            Ok(entry) => TickOutcome::Refreshed { articles: entry.payload.len(), is_fallback: entry.is_fallback },
            Err(e) => {
                error!(error = %e, "scheduled news refresh failed");
                TickOutcome::Failed { reason: e.to_string() }
            }
        }
    }

    /// Spawn the refresh loop on the current runtime.
    ///
    /// Dropping the returned handle also ends the loop.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(shutdown_rx));
        SchedulerHandle { shutdown: shutdown_tx, task }
    }

    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = self.period.as_secs(), "news scheduler started");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    tracing::debug!(?outcome, "news scheduler tick finished");
                }
            }
        }

        info!("news scheduler stopped");
    }
}

/// Handle to a running [`NewsScheduler`].
pub struct SchedulerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop and wait for it to exit. An in-flight tick finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "news scheduler task ended abnormally");
        }
    }
}
