//! Heater stall watchdog
//!
//! The external heater controller occasionally latches its output on
//! without the element actually heating. The watchdog keeps a rolling
//! window starting at the last off→on edge of the heating output (or the
//! last recovery). If the output has stayed on for longer than the window
//! and the temperature rose less than the required amount, the heater is
//! declared stalled and the window restarts, so a persistent fault turns
//! into a slow retry loop rather than a halt.

use crate::time::{Duration, Timestamp};
use crate::Celsius;

/// How long the output may stay on without a temperature rise
pub const HEATER_FAILURE_TIMEOUT: Duration = Duration::from_mins(2);

/// Minimum rise expected within one window (°C)
pub const HEATER_FAILURE_TEMP_RISE: Celsius = 2.0;

/// How long the controller is held stopped during recovery
pub const HEATER_RECOVERY_PAUSE_MS: u32 = 1_000;

/// Heating output history
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaterFailureTracker {
    /// Start of the current window
    pub last_output_transition: Timestamp,
    /// Process value at the start of the current window
    pub last_transition_temp: Celsius,
    /// Last known state of the heating output
    pub is_heating: bool,
}

impl Default for HeaterFailureTracker {
    fn default() -> Self {
        Self {
            last_output_transition: Timestamp::EPOCH,
            last_transition_temp: 0.0,
            is_heating: false,
        }
    }
}

/// Result of one watchdog observation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogVerdict {
    /// Nothing to do
    Healthy,
    /// No process value this tick; evaluation skipped
    NoReading,
    /// Heater stalled; the caller must run a stop/restart cycle
    Stalled {
        /// Time the output has been on without progress
        elapsed: Duration,
        /// Temperature rise over that time
        rise: Celsius,
    },
}

/// Rolling-window heater stall detector
#[derive(Debug, Clone)]
pub struct HeaterWatchdog {
    tracker: HeaterFailureTracker,
    timeout: Duration,
    min_rise: Celsius,
}

impl Default for HeaterWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaterWatchdog {
    /// Create a watchdog with the standard 2 minute / 2 °C window
    pub fn new() -> Self {
        Self {
            tracker: HeaterFailureTracker::default(),
            timeout: HEATER_FAILURE_TIMEOUT,
            min_rise: HEATER_FAILURE_TEMP_RISE,
        }
    }

    pub fn tracker(&self) -> &HeaterFailureTracker {
        &self.tracker
    }

    /// Feed one tick's observations
    ///
    /// # Arguments
    /// - `output_on`: heating output state, `None` if it could not be read
    /// - `pv`: process value, `None` if it could not be read
    ///
    /// On [`WatchdogVerdict::Stalled`] the window has already been restarted
    /// at `(now, pv)`.
    pub fn observe(
        &mut self,
        now: Timestamp,
        output_on: Option<bool>,
        pv: Option<Celsius>,
    ) -> WatchdogVerdict {
        if let Some(on) = output_on {
            if on && !self.tracker.is_heating {
                self.tracker.last_output_transition = now;
                if let Some(temp) = pv {
                    self.tracker.last_transition_temp = temp;
                }
            }
            self.tracker.is_heating = on;
        }

        let Some(current) = pv else {
            return WatchdogVerdict::NoReading;
        };

        let elapsed = now - self.tracker.last_output_transition;
        let rise = current - self.tracker.last_transition_temp;

        if self.tracker.is_heating && elapsed > self.timeout && rise < self.min_rise {
            self.rearm(now, current);
            return WatchdogVerdict::Stalled { elapsed, rise };
        }

        WatchdogVerdict::Healthy
    }

    /// Restart the window at `now` with `temp` as the new baseline
    pub fn rearm(&mut self, now: Timestamp, temp: Celsius) {
        self.tracker.last_output_transition = now;
        self.tracker.last_transition_temp = temp;
    }
}
