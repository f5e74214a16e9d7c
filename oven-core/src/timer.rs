//! Interval timer
//!
//! A timer is a reference point plus a period. It never fires on its own;
//! callers poll [`Timer::is_done`] from the control loop and re-arm with
//! [`Timer::reset`].

use crate::time::{Duration, Timestamp};

/// Single-shot / periodic interval helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    /// Start of the interval in clock milliseconds, negative when a restored
    /// interval began before this boot
    reference: i64,
    period: Duration,
}

fn clock_millis(now: Timestamp) -> i64 {
    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}

impl Timer {
    /// Create a timer referenced at the clock origin
    pub const fn new(period: Duration) -> Self {
        Self {
            reference: 0,
            period,
        }
    }

    /// Restart the interval at `now`
    pub fn reset(&mut self, now: Timestamp) {
        self.reference = clock_millis(now);
    }

    /// True once strictly more than one period has passed since the reference
    pub fn is_done(&self, now: Timestamp) -> bool {
        self.elapsed(now) > self.period
    }

    pub fn elapsed(&self, now: Timestamp) -> Duration {
        Duration::from_millis(clock_millis(now).saturating_sub(self.reference))
    }

    /// Move the reference so that `elapsed(now)` reads `elapsed`
    ///
    /// Used to resume a suspended interval without losing its progress.
    /// `elapsed` may exceed the uptime: after a power cycle the interval
    /// simply started before boot.
    pub fn set_elapsed(&mut self, now: Timestamp, elapsed: Duration) {
        self.reference = clock_millis(now).saturating_sub(elapsed.as_millis());
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Replace the period; the reference point is left untouched
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }
}
