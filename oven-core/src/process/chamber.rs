//! Chamber: one temperature sensor and one fan

use crate::control::{Hysteresis, HysteresisAction};
use crate::time::Timestamp;
use crate::traits::{Output, TempSensor};
use crate::Celsius;

/// A fan-regulated chamber
#[derive(Debug)]
pub struct Chamber<S, F> {
    sensor: S,
    fan: F,
}

impl<S: TempSensor, F: Output> Chamber<S, F> {
    pub fn new(sensor: S, fan: F) -> Self {
        Self { sensor, fan }
    }

    pub fn temp(&mut self, now: Timestamp) -> Option<Celsius> {
        self.sensor.read_temp(now)
    }

    pub fn fan_on(&self) -> bool {
        self.fan.read()
    }

    pub fn fan_off(&mut self) {
        self.fan.write(false);
    }

    /// Run one hysteresis step toward `target`
    ///
    /// The fan is only written when the decision changes it; a failed read
    /// always switches it off.
    pub fn regulate(
        &mut self,
        law: &Hysteresis,
        target: Celsius,
        now: Timestamp,
    ) -> HysteresisAction {
        let reading = self.sensor.read_temp(now);
        let action = law.decide(reading, target, self.fan.read());

        match action {
            HysteresisAction::TurnOn => self.fan.write(true),
            HysteresisAction::TurnOff | HysteresisAction::SensorFault => self.fan.write(false),
            HysteresisAction::Hold => {}
        }

        action
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn fan(&self) -> &F {
        &self.fan
    }

    pub fn fan_mut(&mut self) -> &mut F {
        &mut self.fan
    }
}
