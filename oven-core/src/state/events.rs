//! Operator events
//!
//! Touch-screen buttons, physical buttons and the service console all
//! translate user intent into one of these.

/// Events that can trigger state transitions or overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Start preheating from idle
    Preheat,
    /// Abort whatever is running
    Stop,
    /// Suspend the run, keeping its progress
    Pause,
    /// Start a fresh run, or resume a paused one
    Start,
    /// Forward rotation button pressed
    RotateForward,
    /// Forward rotation button released
    RotateForwardStop,
    /// Backward rotation button pressed
    RotateBackward,
    /// Backward rotation button released
    RotateBackwardStop,
}
