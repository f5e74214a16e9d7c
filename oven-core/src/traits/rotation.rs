//! Rotation motor trait

/// Drum rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

/// Rotation motor
///
/// Forward, backward and stopped are mutually exclusive: starting one
/// direction releases the other.
pub trait Rotation {
    fn start_forward(&mut self);

    fn start_backward(&mut self);

    fn stop(&mut self);

    /// Current direction, `None` when stopped
    fn direction(&self) -> Option<Direction>;

    /// Check if the motor is turning in either direction
    fn is_active(&self) -> bool {
        self.direction().is_some()
    }

    /// Drive in the given direction, or stop on `None`
    fn drive(&mut self, direction: Option<Direction>) {
        match direction {
            Some(Direction::Forward) => self.start_forward(),
            Some(Direction::Backward) => self.start_backward(),
            None => self.stop(),
        }
    }
}

impl<T: Rotation + ?Sized> Rotation for &mut T {
    fn start_forward(&mut self) {
        (**self).start_forward();
    }

    fn start_backward(&mut self) {
        (**self).start_backward();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn direction(&self) -> Option<Direction> {
        (**self).direction()
    }
}
