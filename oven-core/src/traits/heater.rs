//! Temperature sensor and heater controller traits

use core::fmt;

use crate::time::Timestamp;
use crate::Celsius;

/// Errors that can occur with temperature sensing
///
/// The control core only sees a missing reading; drivers use this to log
/// why the reading is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Thermocouple disconnected (open circuit)
    OpenCircuit,
    /// Reading out of expected range or implausible jump
    OutOfRange,
    /// Bus transfer to the converter failed
    Bus,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SensorError::OpenCircuit => "open circuit",
            SensorError::OutOfRange => "reading out of range",
            SensorError::Bus => "bus error",
        };
        f.write_str(msg)
    }
}

/// Chamber temperature sensor
///
/// A forced temperature overrides live reads until cleared. The oven uses
/// this to project the calibrated controller reading onto each chamber;
/// the service console uses it for manual testing.
pub trait TempSensor {
    /// Read the current temperature, `None` if the read failed
    ///
    /// Takes `&mut self` because reads typically go through a bus and may
    /// update a filter.
    fn read_temp(&mut self, now: Timestamp) -> Option<Celsius>;

    /// Override subsequent reads with a fixed value
    fn force_temp(&mut self, temp: Celsius);

    /// Drop the override and return to live reads
    fn unforce_temp(&mut self);
}

/// Heater controller
///
/// Either an external PID controller holding its own setpoint (SV) and
/// measuring its own process value (PV), or a local relay regulated by
/// this firmware. Every read may fail on a communication error.
pub trait HeaterController {
    /// Set the target temperature
    fn set_sv(&mut self, target: Celsius);

    /// Enable or disable heating
    fn set_run(&mut self, run: bool);

    /// Check if heating is enabled
    fn is_running(&self) -> bool;

    /// Read the controller's process value
    fn read_pv(&mut self, now: Timestamp) -> Option<Celsius>;

    /// Read the state of the heating output (relay energized)
    fn read_out1(&mut self, now: Timestamp) -> Option<bool>;

    /// Run any local regulation the backend needs
    ///
    /// Called once per control tick while a heating state is active.
    /// External controllers regulate on their own and keep the default.
    fn service(&mut self, _now: Timestamp) {}
}

impl<T: TempSensor + ?Sized> TempSensor for &mut T {
    fn read_temp(&mut self, now: Timestamp) -> Option<Celsius> {
        (**self).read_temp(now)
    }

    fn force_temp(&mut self, temp: Celsius) {
        (**self).force_temp(temp);
    }

    fn unforce_temp(&mut self) {
        (**self).unforce_temp();
    }
}

impl<T: HeaterController + ?Sized> HeaterController for &mut T {
    fn set_sv(&mut self, target: Celsius) {
        (**self).set_sv(target);
    }

    fn set_run(&mut self, run: bool) {
        (**self).set_run(run);
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn read_pv(&mut self, now: Timestamp) -> Option<Celsius> {
        (**self).read_pv(now)
    }

    fn read_out1(&mut self, now: Timestamp) -> Option<bool> {
        (**self).read_out1(now)
    }

    fn service(&mut self, now: Timestamp) {
        (**self).service(now);
    }
}
