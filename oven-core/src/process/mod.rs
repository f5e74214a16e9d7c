//! Process state machine
//!
//! [`Oven`] owns the process state, the stage timers and the watchdog, and
//! drives the chambers, rotation and heater controller it was built with.

pub mod chamber;
pub mod oven;
pub mod status;

pub use chamber::Chamber;
pub use oven::{Oven, CHAMBER_COUNT, CHAMBER_PV_OFFSETS, SNAPSHOT_INTERVAL};
pub use status::OvenStatus;
