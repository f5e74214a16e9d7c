//! Two-relay drum rotation
//!
//! One relay per direction. The relays are never energized together.

use log::debug;
use oven_core::traits::{Direction, Output, Rotation};

/// Reversible motor on a forward and a backward relay
#[derive(Debug)]
pub struct RelayRotation<O> {
    forward: O,
    backward: O,
}

impl<O: Output> RelayRotation<O> {
    /// Create a stopped rotation driver
    pub fn new(forward: O, backward: O) -> Self {
        let mut rotation = Self { forward, backward };
        rotation.stop();
        rotation
    }

    pub fn forward_relay(&self) -> &O {
        &self.forward
    }

    pub fn backward_relay(&self) -> &O {
        &self.backward
    }
}

impl<O: Output> Rotation for RelayRotation<O> {
    fn start_forward(&mut self) {
        if !self.forward.read() {
            debug!("Rotation forward");
        }
        // Release before engage
        self.backward.write(false);
        self.forward.write(true);
    }

    fn start_backward(&mut self) {
        if !self.backward.read() {
            debug!("Rotation backward");
        }
        self.forward.write(false);
        self.backward.write(true);
    }

    fn stop(&mut self) {
        if self.is_active() {
            debug!("Rotation stop");
        }
        self.forward.write(false);
        self.backward.write(false);
    }

    fn direction(&self) -> Option<Direction> {
        if self.backward.read() {
            Some(Direction::Backward)
        } else if self.forward.read() {
            Some(Direction::Forward)
        } else {
            None
        }
    }
}
