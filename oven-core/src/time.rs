//! Monotonic time primitives
//!
//! All process timing is expressed in milliseconds. `Timestamp` is a point
//! on the board's monotonic clock, `Duration` is a signed span. Arithmetic
//! saturates instead of wrapping so a clock glitch can never produce a
//! huge bogus interval.

use core::fmt::Write;
use core::ops::{Add, Sub};

use heapless::String;
use serde::{Deserialize, Serialize};

const MS_PER_SEC: i64 = 1_000;
const MS_PER_MIN: i64 = 60 * MS_PER_SEC;
const MS_PER_HOUR: i64 = 60 * MS_PER_MIN;

/// Signed span of time with millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duration {
    millis: i64,
}

impl Duration {
    /// Empty duration
    pub const ZERO: Self = Self { millis: 0 };

    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self::from_millis(secs.saturating_mul(MS_PER_SEC))
    }

    pub const fn from_mins(mins: i64) -> Self {
        Self::from_millis(mins.saturating_mul(MS_PER_MIN))
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self::from_millis(hours.saturating_mul(MS_PER_HOUR))
    }

    pub const fn as_millis(self) -> i64 {
        self.millis
    }

    /// Whole seconds, truncated towards zero
    pub const fn as_secs(self) -> i64 {
        self.millis / MS_PER_SEC
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self::from_millis(self.millis.saturating_add(rhs.millis))
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self::from_millis(self.millis.saturating_sub(rhs.millis))
    }

    /// Format as `HH:MM:SS` for status displays
    ///
    /// Negative durations render as `00:00:00`.
    pub fn to_clock_string(self) -> String<16> {
        let total_secs = self.as_secs().max(0);
        let mut out = String::new();
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60
        );
        out
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.saturating_add(rhs)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.saturating_sub(rhs)
    }
}

/// Point on the monotonic clock, in milliseconds since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    /// Clock origin (boot)
    pub const EPOCH: Self = Self { millis: 0 };

    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub const fn as_millis(self) -> u64 {
        self.millis
    }
}

impl Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Duration {
        if self.millis >= rhs.millis {
            let diff = self.millis - rhs.millis;
            Duration::from_millis(i64::try_from(diff).unwrap_or(i64::MAX))
        } else {
            let diff = rhs.millis - self.millis;
            Duration::from_millis(i64::try_from(diff).map_or(i64::MIN, |d| -d))
        }
    }
}
