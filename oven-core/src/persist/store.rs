//! Key/value store backed persistence

use log::{debug, info, warn};
use oven_hal::{KeyValueStore, StorageError, StorageKey};

use super::record::{PersistedState, RecordError, MAX_STATE_SIZE};
use crate::config::Config;
use crate::state::PauseSnapshot;
use crate::traits::Persistence;

/// [`Persistence`] over a key/value store, one record under
/// [`StorageKey::OvenState`]
pub struct StoredState<S> {
    store: S,
}

impl<S: KeyValueStore> StoredState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the stored record, reporting why it is unusable
    pub fn load(&mut self) -> Result<PersistedState, StorageError> {
        let mut buffer = [0u8; MAX_STATE_SIZE];
        let len = self.store.read(StorageKey::OvenState, &mut buffer)?;

        debug!("Read {} bytes of oven state", len);

        PersistedState::from_bytes(&buffer[..len]).map_err(|e| match e {
            RecordError::Serialize => StorageError::BufferTooSmall,
            RecordError::Deserialize | RecordError::TrailingBytes | RecordError::InvalidFormat => {
                StorageError::Corrupted
            }
        })
    }

    /// Remove the stored record entirely
    pub fn erase(&mut self) -> Result<(), StorageError> {
        self.store.remove(StorageKey::OvenState)
    }
}

impl<S: KeyValueStore> Persistence for StoredState<S> {
    fn persist(
        &mut self,
        config: &Config,
        pause: Option<&PauseSnapshot>,
    ) -> Result<(), StorageError> {
        let state = PersistedState::new(*config, pause.copied());

        let mut buffer = [0u8; MAX_STATE_SIZE];
        let bytes = state
            .to_bytes(&mut buffer)
            .map_err(|_| StorageError::BufferTooSmall)?;

        debug!("Saving {} bytes of oven state", bytes.len());
        self.store.write(StorageKey::OvenState, bytes)
    }

    fn restore(&mut self) -> (Config, Option<PauseSnapshot>) {
        match self.load() {
            Ok(state) => {
                info!(
                    "Loaded oven state (snapshot: {})",
                    if state.pause.is_some() { "yes" } else { "no" }
                );
                (state.config, state.pause)
            }
            Err(StorageError::NotFound) => {
                debug!("No oven state stored, using defaults");
                (Config::default(), None)
            }
            Err(e) => {
                warn!("Failed to load oven state: {}, using defaults", e);
                (Config::default(), None)
            }
        }
    }
}
