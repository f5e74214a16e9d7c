//! Safety monitoring
//!
//! Detects a heater that is commanded on but not heating.

pub mod watchdog;

pub use watchdog::{
    HeaterFailureTracker, HeaterWatchdog, WatchdogVerdict, HEATER_FAILURE_TEMP_RISE,
    HEATER_FAILURE_TIMEOUT, HEATER_RECOVERY_PAUSE_MS,
};
