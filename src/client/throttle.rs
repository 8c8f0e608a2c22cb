use std::{future::Future, time::Duration};
use tokio::{
    sync::Mutex,
    time::{sleep_until, Instant},
};

/// Single-concurrency admission queue
///
/// Admits at most one call per `interval`. Waiters are served in FIFO order
/// (tokio's mutex is fair), so a saturated limiter queues callers instead of
/// failing them.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_admission: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_admission: Mutex::new(None),
        }
    }

    /// A limiter that admits every call immediately
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait for this caller's admission slot
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let mut next_admission = self.next_admission.lock().await;
        if let Some(at) = *next_admission {
            if at > Instant::now() {
                sleep_until(at).await;
            }
        }
        *next_admission = Some(Instant::now() + self.interval);
    }

    /// Run `f` once admitted
    pub async fn throttle<F, Fut, T>(&self, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.acquire().await;
        f().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::constants::RATE_LIMIT_INTERVAL_MILLIS,
        ))
    }
}
