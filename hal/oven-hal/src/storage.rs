//! Persistent key-value storage
//!
//! Provides the byte-blob store the oven writes its configuration and pause
//! snapshot into. Implementations typically sit on top of on-chip flash or
//! an EEPROM emulation provided by the vendor SDK.

use core::fmt;

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// Oven configuration plus pause snapshot (binary postcard format)
    OvenState,
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying medium failed
    Backend,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StorageError::Backend => "storage backend failure",
            StorageError::NotFound => "key not found",
            StorageError::BufferTooSmall => "buffer too small",
            StorageError::Corrupted => "stored data corrupted",
            StorageError::Full => "storage full",
        };
        f.write_str(msg)
    }
}

/// Key-value storage trait
///
/// Writes are synchronous: when `write` returns, the caller may assume the
/// data reached the medium. No transactional guarantee is implied, a power
/// cut mid-write may leave a truncated blob behind.
pub trait KeyValueStore {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;

    /// Remove a value
    fn remove(&mut self, key: StorageKey) -> Result<(), StorageError>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> bool {
        let mut probe = [0u8; 1];
        !matches!(self.read(key, &mut probe), Err(StorageError::NotFound))
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(key, buffer)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, data)
    }

    fn remove(&mut self, key: StorageKey) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
