//! Persisted record format

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::state::PauseSnapshot;

/// Magic number identifying an oven state record ("OVEN")
pub const STATE_MAGIC: u32 = 0x4F56_454E;

/// Current record layout version
pub const STATE_VERSION: u8 = 1;

/// Upper bound on the serialized record size
pub const MAX_STATE_SIZE: usize = 128;

/// Record encoding/decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Record does not fit the output buffer
    Serialize,
    /// Bytes are not a record
    Deserialize,
    /// Bytes left over after the record
    TrailingBytes,
    /// Magic or version mismatch
    InvalidFormat,
}

/// Durable oven state
///
/// This struct is serialized to storage using postcard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedState {
    /// Magic number for validation
    pub magic: u32,
    /// Record layout version
    pub version: u8,
    /// Process configuration
    pub config: Config,
    /// Snapshot of a suspended run
    pub pause: Option<PauseSnapshot>,
}

impl PersistedState {
    pub fn new(config: Config, pause: Option<PauseSnapshot>) -> Self {
        Self {
            magic: STATE_MAGIC,
            version: STATE_VERSION,
            config,
            pause,
        }
    }

    /// Check if the header matches this firmware's layout
    pub fn is_valid(&self) -> bool {
        self.magic == STATE_MAGIC && self.version == STATE_VERSION
    }

    /// Serialize into `buffer`, returning the used prefix
    pub fn to_bytes<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], RecordError> {
        postcard::to_slice(self, buffer).map_err(|_| RecordError::Serialize)
    }

    /// Decode a record, rejecting anything that is not exactly one valid record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let (state, rest): (Self, _) =
            postcard::take_from_bytes(bytes).map_err(|_| RecordError::Deserialize)?;

        if !rest.is_empty() {
            return Err(RecordError::TrailingBytes);
        }
        if !state.is_valid() {
            return Err(RecordError::InvalidFormat);
        }

        Ok(state)
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::new(Config::default(), None)
    }
}
