//! Two-threshold on/off control
//!
//! The output switches off once the reading rises above the target and
//! switches back on only after it falls below `target - band`. Inside the
//! band the output holds whatever state it is in, so a reading hovering
//! around the target cannot make the actuator chatter.
//!
//! The same law drives the chamber fans and the direct-drive heater relay.

use crate::Celsius;

/// Decision taken for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HysteresisAction {
    /// Output was off and the reading fell below the lower threshold
    TurnOn,
    /// Output was on and the reading rose above the target
    TurnOff,
    /// Keep the output as it is
    Hold,
    /// No reading; the output must be forced off
    SensorFault,
}

impl HysteresisAction {
    /// Output state after applying this action to `current`
    pub fn apply_to(self, current: bool) -> bool {
        match self {
            HysteresisAction::TurnOn => true,
            HysteresisAction::TurnOff | HysteresisAction::SensorFault => false,
            HysteresisAction::Hold => current,
        }
    }
}

/// Hysteresis control law with a fixed band width
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hysteresis {
    band: Celsius,
}

impl Hysteresis {
    pub const fn new(band: Celsius) -> Self {
        Self { band }
    }

    pub fn band(&self) -> Celsius {
        self.band
    }

    /// Reading below which an off output turns back on
    pub fn low_threshold(&self, target: Celsius) -> Celsius {
        target - self.band
    }

    /// Decide what to do with an output currently at `is_on`
    pub fn decide(&self, reading: Option<Celsius>, target: Celsius, is_on: bool) -> HysteresisAction {
        let Some(temp) = reading else {
            return HysteresisAction::SensorFault;
        };

        if is_on && temp > target {
            HysteresisAction::TurnOff
        } else if !is_on && temp < self.low_threshold(target) {
            HysteresisAction::TurnOn
        } else {
            HysteresisAction::Hold
        }
    }
}
