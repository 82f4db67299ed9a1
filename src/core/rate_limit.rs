use std::collections::VecDeque;
use tokio::time::{sleep, Duration, Instant};

/// Nominal rolling window the request ceiling is defined over
const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Minimum spacing enforced between a batch start and the start of the
/// batch `capacity` positions earlier; the extra second is slack against
/// clock and latency drift
const MIN_SPACING: Duration = Duration::from_secs(61);

/// Sliding-window limiter on batch starts
///
/// Keeps a fixed-capacity history of batch-start timestamps, most recent
/// first. Capacity is `floor(rate_limit / (2 * parallelism))`: the number
/// of batches whose requests could all still be in flight inside one
/// rolling minute without breaching the ceiling, given two HTTP calls per
/// address.
///
/// This bounds the *start* rate of batches, not the completion rate of
/// individual requests; bursts within a batch are not separately
/// throttled. It is a deliberate bounded-memory approximation, not a
/// token bucket.
pub struct SlidingWindowLimiter {
    window: VecDeque<Instant>,
    capacity: usize,
}

impl SlidingWindowLimiter {
    /// `rate_limit_per_minute` counts individual HTTP requests; each
    /// screened address costs two of them.
    pub fn new(rate_limit_per_minute: u32, per_batch_parallelism: usize) -> Self {
        let requests_per_batch = 2 * per_batch_parallelism.max(1) as u32;
        // Clamped to 1 so a ceiling below one batch's worth of requests
        // degrades to fully serialized batches instead of a stall
        let capacity = (rate_limit_per_minute / requests_per_batch).max(1) as usize;

        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a batch start, evicting the oldest timestamp once the
    /// window is at capacity
    pub fn record_batch_start(&mut self, now: Instant) {
        self.window.push_front(now);
        if self.window.len() > self.capacity {
            self.window.pop_back();
        }
    }

    /// Suspend until starting another batch cannot breach the ceiling
    ///
    /// No wait occurs until `capacity` batches have started. After that,
    /// the oldest start in the window must be at least `MIN_SPACING` old
    /// before the next batch may begin.
    pub async fn await_if_needed(&self) {
        if self.window.len() < self.capacity {
            return;
        }

        let Some(oldest) = self.window.back().copied() else {
            return;
        };

        let age = oldest.elapsed();
        if age < RATE_WINDOW {
            let wait = MIN_SPACING - age;
            tracing::info!(
                "Rate limit window full, pausing {:.1}s before next batch",
                wait.as_secs_f64()
            );
            sleep(wait).await;
        }
    }
}
