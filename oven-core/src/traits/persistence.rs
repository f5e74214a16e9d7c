//! Persistence trait

use oven_hal::StorageError;

use crate::config::Config;
use crate::state::PauseSnapshot;

/// Durable home of the configuration and the pause snapshot
///
/// Writes are synchronous; the control loop waits for `persist` to return.
pub trait Persistence {
    /// Store the configuration and the current snapshot (or its absence)
    fn persist(&mut self, config: &Config, pause: Option<&PauseSnapshot>)
        -> Result<(), StorageError>;

    /// Load what was last stored, falling back to defaults
    fn restore(&mut self) -> (Config, Option<PauseSnapshot>);
}

impl<T: Persistence + ?Sized> Persistence for &mut T {
    fn persist(
        &mut self,
        config: &Config,
        pause: Option<&PauseSnapshot>,
    ) -> Result<(), StorageError> {
        (**self).persist(config, pause)
    }

    fn restore(&mut self) -> (Config, Option<PauseSnapshot>) {
        (**self).restore()
    }
}
