//! One-shot status report for UI and console layers

use crate::process::oven::CHAMBER_COUNT;
use crate::state::ProcessState;
use crate::time::Duration;
use crate::traits::Direction;
use crate::Celsius;

/// Everything a status screen shows, read in one pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OvenStatus {
    /// Current process state
    pub state: ProcessState,
    /// Heater controller run flag
    pub heater_on: bool,
    /// Fan state per chamber
    pub fans: [bool; CHAMBER_COUNT],
    /// Estimated oven temperature
    pub oven_temp: Option<Celsius>,
    /// Reading per chamber
    pub chamber_temps: [Option<Celsius>; CHAMBER_COUNT],
    /// Rotation direction, `None` when stopped
    pub rotation: Option<Direction>,
    /// Progress into the current stage
    pub stage_elapsed: Option<Duration>,
    /// Length of the current stage
    pub stage_duration: Option<Duration>,
    /// A paused run is waiting to be resumed
    pub paused: bool,
}

impl OvenStatus {
    /// Operator-facing state name
    pub fn display_state(&self) -> &'static str {
        self.state.display_name()
    }

    /// Time left in the current stage, clamped at zero
    pub fn stage_remaining(&self) -> Option<Duration> {
        let elapsed = self.stage_elapsed?;
        let total = self.stage_duration?;
        Some(total.saturating_sub(elapsed).max(Duration::ZERO))
    }
}
