//! Configuration and pause snapshot persistence
//!
//! The whole durable state of the oven is one small record stored under a
//! single key: the configuration plus the snapshot of a suspended run.

pub mod record;
pub mod store;

pub use record::{PersistedState, RecordError, MAX_STATE_SIZE, STATE_MAGIC, STATE_VERSION};
pub use store::StoredState;
