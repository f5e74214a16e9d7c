//! Direct-drive relay heater
//!
//! The heating elements hang off one or more relays and the firmware
//! closes the loop itself: [`service`](HeaterController::service) runs the
//! same two-threshold law the chambers use, against the heater's own
//! sensor.

use log::{debug, warn};
use oven_core::control::{Hysteresis, HysteresisAction};
use oven_core::traits::{HeaterController, Output, TempSensor};
use oven_core::{Celsius, Timestamp};

/// Relay heater configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayHeaterConfig {
    /// Highest setpoint accepted (°C)
    pub max_temp: Celsius,
    /// Hysteresis band below the setpoint (°C)
    pub band: Celsius,
}

impl Default for RelayHeaterConfig {
    fn default() -> Self {
        Self {
            max_temp: 150.0,
            band: 2.0,
        }
    }
}

/// Relay heater with local on/off regulation
pub struct RelayHeater<S, O> {
    sensor: S,
    relays: O,
    config: RelayHeaterConfig,
    law: Hysteresis,
    target: Celsius,
    running: bool,
}

impl<S: TempSensor, O: Output> RelayHeater<S, O> {
    /// Create a stopped heater; the relays are switched off
    pub fn new(sensor: S, relays: O, config: RelayHeaterConfig) -> Self {
        let mut heater = Self {
            sensor,
            relays,
            config,
            law: Hysteresis::new(config.band),
            target: 0.0,
            running: false,
        };
        heater.relays.write(false);
        heater
    }

    pub fn target(&self) -> Celsius {
        self.target
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn relays(&self) -> &O {
        &self.relays
    }
}

impl<S: TempSensor, O: Output> HeaterController for RelayHeater<S, O> {
    fn set_sv(&mut self, target: Celsius) {
        // Never regulate above the configured maximum
        self.target = target.min(self.config.max_temp);
    }

    fn set_run(&mut self, run: bool) {
        self.running = run;
        if !run {
            self.relays.write(false);
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn read_pv(&mut self, now: Timestamp) -> Option<Celsius> {
        self.sensor.read_temp(now)
    }

    fn read_out1(&mut self, _now: Timestamp) -> Option<bool> {
        Some(self.relays.read())
    }

    fn service(&mut self, now: Timestamp) {
        if !self.running {
            self.relays.write(false);
            return;
        }

        let reading = self.sensor.read_temp(now);
        match self.law.decide(reading, self.target, self.relays.read()) {
            HysteresisAction::TurnOn => {
                debug!("Heater relays on");
                self.relays.write(true);
            }
            HysteresisAction::TurnOff => {
                debug!("Heater relays off");
                self.relays.write(false);
            }
            HysteresisAction::SensorFault => {
                warn!("Heater sensor read failed, relays off");
                self.relays.write(false);
            }
            HysteresisAction::Hold => {}
        }
    }
}
