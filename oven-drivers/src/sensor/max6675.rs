//! MAX6675 K-type thermocouple converter
//!
//! The converter shifts out a 16-bit frame: bits 15..3 hold the
//! temperature in 0.25 °C steps, bit 2 is set when the thermocouple is
//! open. A conversion takes ~220 ms, so the chip is polled at most every
//! [`POLL_INTERVAL`] and the cached value is returned in between.
//!
//! Readings are smoothed with an exponential filter. Frames that read
//! exactly zero or jump more than [`MAX_JUMP`] from the filtered value are
//! treated as glitches and dropped; the previous value is kept.

use embedded_hal::spi::SpiDevice;
use log::{trace, warn};
use oven_core::traits::{SensorError, TempSensor};
use oven_core::{Celsius, Duration, Timer, Timestamp};

/// Minimum time between two conversions read from the chip
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Largest accepted change between the filtered value and a new frame (°C)
pub const MAX_JUMP: Celsius = 100.0;

/// Weight of a new frame in the exponential filter
const SMOOTHING: Celsius = 0.3;

/// Open thermocouple flag
const OPEN_CIRCUIT_BIT: u16 = 0x0004;

/// Decode a raw conversion frame
pub fn decode_frame(raw: u16) -> Result<Celsius, SensorError> {
    if raw & OPEN_CIRCUIT_BIT != 0 {
        return Err(SensorError::OpenCircuit);
    }
    Ok((raw >> 3) as Celsius * 0.25)
}

/// MAX6675 on an SPI bus
///
/// The SPI device owns chip select; the bus must run in mode 0 at up to
/// 4.3 MHz.
pub struct Max6675<SPI> {
    spi: SPI,
    poll: Timer,
    /// Filtered temperature
    last: Option<Celsius>,
    /// Override set from the service console or the oven estimator
    forced: Option<Celsius>,
}

impl<SPI: SpiDevice> Max6675<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            poll: Timer::new(POLL_INTERVAL),
            last: None,
            forced: None,
        }
    }

    /// Read one frame straight from the chip, bypassing filter and override
    pub fn sample(&mut self) -> Result<Celsius, SensorError> {
        let mut frame = [0u8; 2];
        self.spi.read(&mut frame).map_err(|_| SensorError::Bus)?;
        let raw = u16::from_be_bytes(frame);
        trace!("MAX6675 raw frame {:#06x}", raw);
        decode_frame(raw)
    }

    /// Last filtered value, without touching the bus
    pub fn filtered(&self) -> Option<Celsius> {
        self.last
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn plausible(&self, temp: Celsius) -> Result<Celsius, SensorError> {
        if temp == 0.0 {
            return Err(SensorError::OutOfRange);
        }
        if let Some(last) = self.last {
            let jump = temp - last;
            if jump > MAX_JUMP || jump < -MAX_JUMP {
                return Err(SensorError::OutOfRange);
            }
        }
        Ok(temp)
    }
}

impl<SPI: SpiDevice> TempSensor for Max6675<SPI> {
    fn read_temp(&mut self, now: Timestamp) -> Option<Celsius> {
        if let Some(forced) = self.forced {
            return Some(forced);
        }

        if self.last.is_some() && !self.poll.is_done(now) {
            return self.last;
        }
        self.poll.reset(now);

        match self.sample().and_then(|temp| self.plausible(temp)) {
            Ok(temp) => {
                self.last = Some(match self.last {
                    Some(last) => last * (1.0 - SMOOTHING) + temp * SMOOTHING,
                    None => temp,
                });
            }
            Err(SensorError::OpenCircuit) => {
                warn!("Thermocouple open");
                self.last = None;
            }
            Err(e) => warn!("Thermocouple frame dropped: {}", e),
        }

        self.last
    }

    fn force_temp(&mut self, temp: Celsius) {
        self.forced = Some(temp);
    }

    fn unforce_temp(&mut self) {
        self.forced = None;
    }
}
