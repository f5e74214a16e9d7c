//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in oven-core for the oven's hardware:
//!
//! - Switched outputs (fans, relay banks) on GPIO pins
//! - Two-relay drum rotation
//! - MAX6675 thermocouple converters on SPI
//! - Heater controllers (local relay regulation, external PID over a register bus)

#![no_std]
#![deny(unsafe_code)]

pub mod heater;
pub mod output;
pub mod rotation;
pub mod sensor;

pub use heater::{ModbusHeater, RelayHeater, RelayHeaterConfig};
pub use output::{GpioOutput, RelayBank};
pub use rotation::RelayRotation;
pub use sensor::Max6675;
