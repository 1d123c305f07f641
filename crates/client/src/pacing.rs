//! Pacing primitives for quota-limited upstream providers.
//!
//! A [`Pacer`] is awaited between two consecutive upstream calls. The batch
//! job uses [`FixedDelay`]; the news client spaces its own requests with
//! [`MinInterval`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Waits between two consecutive upstream calls.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}

/// Sleeps for a fixed duration every time it is awaited.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pace(&self) {
        if !self.delay.is_zero() {
            tracing::debug!(delay_ms = self.delay.as_millis() as u64, "pacing before next upstream call");
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Enforces a minimum interval between acquisitions.
///
/// The first acquisition never waits.
#[derive(Debug)]
pub struct MinInterval {
    last: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl MinInterval {
    pub fn new(min_interval: Duration) -> Self {
        Self { last: Mutex::new(None), min_interval }
    }

    /// Acquire permission to make a request, waiting if necessary.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl Pacer for MinInterval {
    async fn pace(&self) {
        self.acquire().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let pacer = FixedDelay::new(Duration::from_secs(2));
        let start = Instant::now();
        pacer.pace().await;
        pacer.pace().await;
        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_zero_is_immediate() {
        let pacer = FixedDelay::new(Duration::ZERO);
        let start = Instant::now();
        pacer.pace().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_first_acquire_is_free() {
        let limiter = MinInterval::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_no_wait_after_gap() {
        let limiter = MinInterval::new(Duration::from_secs(1));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
