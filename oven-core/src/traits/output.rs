//! Switched output trait

/// On/off actuator (chamber fan, heater relay)
pub trait Output {
    /// Switch the output on or off
    fn write(&mut self, on: bool);

    /// Check if the output is currently on
    fn read(&self) -> bool;
}

impl<T: Output + ?Sized> Output for &mut T {
    fn write(&mut self, on: bool) {
        (**self).write(on);
    }

    fn read(&self) -> bool {
        (**self).read()
    }
}
