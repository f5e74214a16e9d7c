//! Control laws

pub mod hysteresis;

pub use hysteresis::{Hysteresis, HysteresisAction};
