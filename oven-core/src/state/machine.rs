//! State machine definition
//!
//! All heater, fan and rotation behavior is a function of the current
//! state, the rotation override and the tick/event being processed.

use serde::{Deserialize, Serialize};

use crate::traits::Direction;

/// One of the three timed stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StageId {
    /// Stage 1
    First,
    /// Stage 2
    Second,
    /// Stage 3
    Third,
}

impl StageId {
    /// All stages in execution order
    pub const ALL: [StageId; 3] = [StageId::First, StageId::Second, StageId::Third];

    /// Zero-based position, used to index per-stage tables
    pub const fn index(self) -> usize {
        match self {
            StageId::First => 0,
            StageId::Second => 1,
            StageId::Third => 2,
        }
    }

    /// Stage that follows this one, `None` after the last
    pub const fn next(self) -> Option<StageId> {
        match self {
            StageId::First => Some(StageId::Second),
            StageId::Second => Some(StageId::Third),
            StageId::Third => None,
        }
    }
}

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcessState {
    /// Heater, fans and rotation off (unless rotation is forced)
    Idle,
    /// Heating up to the preheat target, no rotation
    Preheating,
    /// Timed temperature hold with forward rotation
    Stage(StageId),
}

impl ProcessState {
    /// Internal name, used in logs and the service console
    pub const fn name(self) -> &'static str {
        match self {
            ProcessState::Idle => "Idle",
            ProcessState::Preheating => "Preheating",
            ProcessState::Stage(StageId::First) => "Stage1",
            ProcessState::Stage(StageId::Second) => "Stage2",
            ProcessState::Stage(StageId::Third) => "Stage3",
        }
    }

    /// Operator-facing name shown on the touch screen
    pub const fn display_name(self) -> &'static str {
        match self {
            ProcessState::Idle => "Detenido",
            ProcessState::Preheating => "Precalentando",
            ProcessState::Stage(StageId::First) => "Etapa Inicial",
            ProcessState::Stage(StageId::Second) => "Etapa Intermedia",
            ProcessState::Stage(StageId::Third) => "Etapa Final",
        }
    }

    /// Check if the heater controller is meant to be running
    pub const fn is_heating(self) -> bool {
        !matches!(self, ProcessState::Idle)
    }

    /// Check if the manual rotation override applies in this state
    ///
    /// Stages always rotate forward; the override is only for loading and
    /// unloading while idle or preheating.
    pub const fn allows_rotation_override(self) -> bool {
        matches!(self, ProcessState::Idle | ProcessState::Preheating)
    }

    /// The stage being held, if any
    pub const fn stage(self) -> Option<StageId> {
        match self {
            ProcessState::Stage(stage) => Some(stage),
            _ => None,
        }
    }

    /// The suspendable phase this state corresponds to
    pub const fn run_phase(self) -> Option<RunPhase> {
        match self {
            ProcessState::Idle => None,
            ProcessState::Preheating => Some(RunPhase::Preheating),
            ProcessState::Stage(stage) => Some(RunPhase::Stage(stage)),
        }
    }
}

/// States a run can be suspended in
///
/// This is [`ProcessState`] without `Idle`: there is nothing to resume
/// from an idle machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunPhase {
    Preheating,
    Stage(StageId),
}

impl From<RunPhase> for ProcessState {
    fn from(phase: RunPhase) -> Self {
        match phase {
            RunPhase::Preheating => ProcessState::Preheating,
            RunPhase::Stage(stage) => ProcessState::Stage(stage),
        }
    }
}

/// Manual rotation override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationMode {
    /// Rotation follows the process (stopped outside stages)
    #[default]
    Normal,
    /// Operator holds the forward button
    ForceForward,
    /// Operator holds the backward button
    ForceBackward,
}

impl RotationMode {
    /// Direction the override asks for, `None` meaning stopped
    pub const fn forced_direction(self) -> Option<Direction> {
        match self {
            RotationMode::Normal => None,
            RotationMode::ForceForward => Some(Direction::Forward),
            RotationMode::ForceBackward => Some(Direction::Backward),
        }
    }
}
