use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration, Instant};

/// Paces outbound calls to one data provider so the dashboard stays inside
/// its published request budget. Each provider client owns one.
#[derive(Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    min_delay: Duration,
    last_request: Arc<tokio::sync::Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// `max_concurrent` in-flight provider calls, started at least
    /// `min_delay_ms` apart
    pub fn new(max_concurrent: usize, min_delay_ms: u64) -> Self {
        RateLimiter {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            min_delay: Duration::from_millis(min_delay_ms),
            last_request: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }

    /// Wait until the next provider call may start; hold the guard for the
    /// duration of the call
    pub async fn acquire(&self) -> RateLimitGuard {
        // The semaphore is never closed, so a failed acquire only means no permit is held.
        let permit = self.semaphore.clone().acquire_owned().await.ok();

        let mut last_request = self.last_request.lock().await;
        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                let wait_time = self.min_delay - elapsed;
                tracing::debug!(?wait_time, "pacing provider request");
                sleep(wait_time).await;
            }
        }
        *last_request = Some(Instant::now());
        drop(last_request);

        RateLimitGuard { _permit: permit }
    }

    /// Calls that could start right now without waiting on a permit
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Permit for one provider call
pub struct RateLimitGuard {
    _permit: Option<tokio::sync::OwnedSemaphorePermit>,
}

impl Drop for RateLimitGuard {
    fn drop(&mut self) {
        tracing::trace!("provider permit released");
    }
}
