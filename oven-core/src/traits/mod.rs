//! Hardware collaborator traits
//!
//! These traits define the interface between the process logic and the
//! hardware-specific implementations. Every trait is also implemented for
//! `&mut T`, so a board can lend its peripherals to the oven instead of
//! moving them in.

pub mod heater;
pub mod output;
pub mod persistence;
pub mod rotation;

pub use heater::{HeaterController, SensorError, TempSensor};
pub use output::Output;
pub use persistence::Persistence;
pub use rotation::{Direction, Rotation};
