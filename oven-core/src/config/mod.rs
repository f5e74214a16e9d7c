//! Configuration types
//!
//! Process configuration, stored alongside the pause snapshot as postcard
//! binary data.

pub mod types;

pub use types::*;
