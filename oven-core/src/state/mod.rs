//! Process state definitions
//!
//! The state machine is explicit, finite, and deterministic. This module
//! holds the data types; the behavior lives in [`crate::process`].

pub mod events;
pub mod machine;
pub mod snapshot;

pub use events::Event;
pub use machine::{ProcessState, RotationMode, RunPhase, StageId};
pub use snapshot::PauseSnapshot;
