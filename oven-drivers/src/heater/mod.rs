//! Heater controller backends
//!
//! Two interchangeable implementations of
//! [`HeaterController`](oven_core::traits::HeaterController): a relay bank
//! regulated locally, and an external PID controller on a register bus.

pub mod modbus;
pub mod relay;

pub use modbus::ModbusHeater;
pub use relay::{RelayHeater, RelayHeaterConfig};
