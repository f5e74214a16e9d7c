//! Curing oven hardware abstraction layer
//!
//! This crate defines the board-facing traits the oven drivers are written
//! against. A board support crate implements them for its chip, and the
//! same drivers and control core run unchanged on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  oven-core (process state machine)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oven-drivers (fans, rotation, heater)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oven-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs (fans, rotation relays, heater SSRs)
//! - [`bus::RegisterBus`] - Register access to a field-bus temperature controller
//! - [`storage::KeyValueStore`] - Persistent byte-blob storage

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use bus::{BusError, RegisterBus};
pub use gpio::OutputPin;
pub use storage::{KeyValueStore, StorageError, StorageKey};
