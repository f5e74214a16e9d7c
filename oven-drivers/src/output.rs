//! GPIO switched outputs
//!
//! Fans, heater relays and rotation relays are all plain on/off outputs
//! driven from a GPIO pin, directly or through an SSR/contactor.

use oven_core::traits::Output;
use oven_hal::OutputPin;

/// GPIO output
///
/// Controls a load via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
#[derive(Debug)]
pub struct GpioOutput<P> {
    pin: P,
    /// If true, output ON = pin LOW
    inverted: bool,
}

impl<P: OutputPin> GpioOutput<P> {
    /// Create a new GPIO output, switched off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the load is ON when the pin is LOW (active-low relay boards)
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut output = Self { pin, inverted };
        output.write(false);
        output
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> Output for GpioOutput<P> {
    fn write(&mut self, on: bool) {
        self.pin.set_state(on != self.inverted);
    }

    fn read(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

/// Several outputs switched together
///
/// Used for loads split across parallel relays; the state is read back
/// from the first one.
#[derive(Debug)]
pub struct RelayBank<O, const N: usize> {
    outputs: [O; N],
}

impl<O: Output, const N: usize> RelayBank<O, N> {
    pub fn new(outputs: [O; N]) -> Self {
        let mut bank = Self { outputs };
        bank.write(false);
        bank
    }

    pub fn outputs(&self) -> &[O; N] {
        &self.outputs
    }
}

impl<O: Output, const N: usize> Output for RelayBank<O, N> {
    fn write(&mut self, on: bool) {
        for output in self.outputs.iter_mut() {
            output.write(on);
        }
    }

    fn read(&self) -> bool {
        self.outputs.first().is_some_and(|output| output.read())
    }
}
