//! Pause snapshot
//!
//! A suspended run is fully described by the phase it was in and how far
//! into that phase's timer it got.

use serde::{Deserialize, Serialize};

use super::machine::{ProcessState, RunPhase, StageId};
use crate::time::Duration;

/// Persisted `{phase, elapsed}` pair used to resume a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PauseSnapshot {
    phase: RunPhase,
    elapsed: Duration,
}

impl PauseSnapshot {
    pub const fn new(phase: RunPhase, elapsed: Duration) -> Self {
        Self { phase, elapsed }
    }

    /// Snapshot of a preheat; preheating has no timer so nothing elapses
    pub const fn preheating() -> Self {
        Self::new(RunPhase::Preheating, Duration::ZERO)
    }

    pub const fn stage(stage: StageId, elapsed: Duration) -> Self {
        Self::new(RunPhase::Stage(stage), elapsed)
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// State the machine returns to on resume
    pub fn state(&self) -> ProcessState {
        self.phase.into()
    }

    /// Progress into the stage timer at the moment of capture
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
