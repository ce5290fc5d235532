//! Fixed-rate tick pacing for the control loops.
//!
//! Each loop calls [`Ticker::wait`] once per iteration.  Deadlines advance
//! by exactly one period so the rate does not drift with loop body time.
//! If the loop falls more than [`MAX_LAG_PERIODS`] behind, the backlog is
//! skipped instead of replayed.

use core::time::Duration;
use std::time::Instant;

/// Lag (in periods) after which the schedule restarts from now.
pub const MAX_LAG_PERIODS: u32 = 2;

pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next deadline, advancing the schedule.
    /// Returns `Duration::ZERO` when already late.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let wait = self.next.saturating_duration_since(now);
        if now > self.next + self.period * MAX_LAG_PERIODS {
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
        wait
    }

    /// Sleep until the next deadline.
    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}
