//! Elapsed-time budget for size computation
//!
//! The budget is polled once per file visit. When the limit is reached the
//! budget latches: every later poll reports exhaustion without reading the
//! clock again, so sizes are never resumed part-way through a walk.

use std::time::{Duration, Instant};

/// Source of monotonic time for the walk.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The process monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Tracks time spent in a walk against an optional limit.
#[derive(Debug)]
pub struct Budget<C: Clock> {
    clock: C,
    started: Instant,
    limit: Option<Duration>,
    exhausted_at: Option<Duration>,
}

impl<C: Clock> Budget<C> {
    /// Start the timer now. `limit = None` disables the budget.
    pub fn start(clock: C, limit: Option<Duration>) -> Self {
        let started = clock.now();
        Self {
            clock,
            started,
            limit,
            exhausted_at: None,
        }
    }

    /// Poll the budget before reading a file size.
    ///
    /// Returns `false` once `elapsed >= limit`, and keeps returning `false`
    /// for the rest of the walk.
    pub fn allows_measure(&mut self) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };
        if self.exhausted_at.is_some() {
            return false;
        }
        let elapsed = self.elapsed();
        if elapsed >= limit {
            log::info!(
                "time budget of {:.2}s exhausted after {:.2}s; remaining file sizes will be unknown",
                limit.as_secs_f64(),
                elapsed.as_secs_f64()
            );
            self.exhausted_at = Some(elapsed);
            return false;
        }
        true
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started)
    }

    pub fn is_enabled(&self) -> bool {
        self.limit.is_some()
    }

    /// Elapsed time at which the budget ran out, if it did.
    pub fn exhausted_at(&self) -> Option<Duration> {
        self.exhausted_at
    }
}
