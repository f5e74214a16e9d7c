//! Board-agnostic control core for the curing oven firmware
//!
//! This crate contains all process logic that does not depend on
//! specific hardware implementations:
//!
//! - Time primitives and interval timers
//! - Process configuration and its persisted form
//! - Hardware collaborator traits (sensors, fans, rotation, heater controller)
//! - Per-chamber hysteresis control
//! - Heater stall watchdog
//! - The process state machine driving preheat and the three timed stages

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod persist;
pub mod process;
pub mod safety;
pub mod state;
pub mod time;
pub mod timer;
pub mod traits;

/// Temperature in degrees Celsius
pub type Celsius = f32;

pub use config::{Config, StageConfig};
pub use process::{Chamber, Oven, OvenStatus};
pub use state::{Event, PauseSnapshot, ProcessState, RotationMode, RunPhase, StageId};
pub use time::{Duration, Timestamp};
pub use timer::Timer;
