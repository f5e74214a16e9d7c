//! Register bus abstraction
//!
//! Field-bus temperature controllers (RS-485 Modbus RTU and similar) expose
//! their setpoint, run flag, process value and output state as registers.
//! The transport lives in the board crate; drivers only see this trait.

use core::fmt;

/// Errors from register bus transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// No response within the transaction timeout
    Timeout,
    /// Response failed its checksum
    Crc,
    /// Device answered with an exception code
    Exception(u8),
    /// Transport-level failure (UART, transceiver)
    Transport,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Timeout => f.write_str("timeout"),
            BusError::Crc => f.write_str("crc mismatch"),
            BusError::Exception(code) => write!(f, "device exception {}", code),
            BusError::Transport => f.write_str("transport failure"),
        }
    }
}

/// Register access to a single bus device
///
/// The device address is bound when the implementation is constructed.
pub trait RegisterBus {
    /// Write a single holding register
    fn write_register(&mut self, address: u16, value: u16) -> Result<(), BusError>;

    /// Read a single input register
    fn read_input_register(&mut self, address: u16) -> Result<u16, BusError>;

    /// Read a single discrete input bit
    fn read_input_bit(&mut self, address: u16) -> Result<bool, BusError>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    fn write_register(&mut self, address: u16, value: u16) -> Result<(), BusError> {
        (**self).write_register(address, value)
    }

    fn read_input_register(&mut self, address: u16) -> Result<u16, BusError> {
        (**self).read_input_register(address)
    }

    fn read_input_bit(&mut self, address: u16) -> Result<bool, BusError> {
        (**self).read_input_bit(address)
    }
}
