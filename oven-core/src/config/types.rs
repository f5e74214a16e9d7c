//! Configuration type definitions
//!
//! The process configuration is a preheat target, the chamber hysteresis
//! band and exactly three timed stages. It is produced by the setup screen
//! (or loaded from storage at boot) and consumed by the process state
//! machine.

use serde::{Deserialize, Serialize};

use crate::state::StageId;
use crate::time::Duration;
use crate::Celsius;

/// Number of timed stages after preheat
pub const STAGE_COUNT: usize = 3;

/// One timed temperature hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StageConfig {
    /// Target temperature (°C)
    pub temp: Celsius,
    /// How long the stage holds once entered
    pub duration: Duration,
}

impl StageConfig {
    pub const fn new(temp: Celsius, duration: Duration) -> Self {
        Self { temp, duration }
    }
}

/// Complete process configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Oven temperature at which preheating ends (°C)
    pub preheat_temp: Celsius,
    /// Hysteresis band shared by all chamber fans (°C)
    pub chamber_temp_hist: Celsius,
    /// Stage 1..3, in execution order
    pub stages: [StageConfig; STAGE_COUNT],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preheat_temp: 60.0,
            chamber_temp_hist: 2.0,
            stages: [
                StageConfig::new(60.0, Duration::from_mins(30)),
                StageConfig::new(80.0, Duration::from_mins(60)),
                StageConfig::new(100.0, Duration::from_mins(30)),
            ],
        }
    }
}

impl Config {
    /// Configuration of a single stage
    pub fn stage(&self, stage: StageId) -> &StageConfig {
        &self.stages[stage.index()]
    }

    /// Mutable configuration of a single stage
    pub fn stage_mut(&mut self, stage: StageId) -> &mut StageConfig {
        &mut self.stages[stage.index()]
    }

    /// Sum of all stage durations (preheat excluded, it has no fixed length)
    pub fn total_duration(&self) -> Duration {
        self.stages
            .iter()
            .fold(Duration::ZERO, |acc, stage| acc + stage.duration)
    }
}
