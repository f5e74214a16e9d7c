//! External PID controller on a register bus
//!
//! The controller keeps its own setpoint (SV), measures its own process
//! value (PV) and drives the heating elements from its OUT1 relay. All
//! values are whole degrees on the wire, signed 16-bit.
//!
//! Bus failures are logged and reported as missing readings; the control
//! core treats those the same as a failed sensor.

use log::warn;
use oven_core::traits::HeaterController;
use oven_core::{Celsius, Timestamp};
use oven_hal::RegisterBus;

/// Setpoint (holding register)
pub const SV_ADDRESS: u16 = 0x0000;
/// Run/stop (holding register); 0 = run, 1 = stop
pub const RUN_ADDRESS: u16 = 0x0032;
/// Process value (input register)
pub const PV_ADDRESS: u16 = 0x03E8;
/// Heating output state (input bit)
pub const OUT1_ADDRESS: u16 = 0x0003;

const RUN: u16 = 0;
const STOP: u16 = 1;

/// Round to the nearest whole degree and encode as a signed register
fn encode_temp(temp: Celsius) -> u16 {
    let rounded = if temp >= 0.0 { temp + 0.5 } else { temp - 0.5 };
    // `as` saturates at the i16 range
    (rounded as i16) as u16
}

fn decode_temp(raw: u16) -> Celsius {
    (raw as i16) as Celsius
}

/// PID controller behind a [`RegisterBus`]
pub struct ModbusHeater<B> {
    bus: B,
    /// Last run state the controller acknowledged
    running: bool,
}

impl<B: RegisterBus> ModbusHeater<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            running: false,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: RegisterBus> HeaterController for ModbusHeater<B> {
    fn set_sv(&mut self, target: Celsius) {
        if let Err(e) = self.bus.write_register(SV_ADDRESS, encode_temp(target)) {
            warn!("Failed to set SV: {}", e);
        }
    }

    fn set_run(&mut self, run: bool) {
        let value = if run { RUN } else { STOP };
        match self.bus.write_register(RUN_ADDRESS, value) {
            Ok(()) => self.running = run,
            Err(e) => warn!("Failed to set run: {}", e),
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn read_pv(&mut self, _now: Timestamp) -> Option<Celsius> {
        self.bus
            .read_input_register(PV_ADDRESS)
            .map(decode_temp)
            .map_err(|e| warn!("Failed to read PV: {}", e))
            .ok()
    }

    fn read_out1(&mut self, _now: Timestamp) -> Option<bool> {
        self.bus
            .read_input_bit(OUT1_ADDRESS)
            .map_err(|e| warn!("Failed to read output: {}", e))
            .ok()
    }
}
