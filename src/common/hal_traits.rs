// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

use super::types::BaudRate;

/// A point in time, as reported by the platform's monotonic clock.
///
/// Deadline checks only need addition of a [`Duration`] and ordering, so any
/// HAL instant type qualifies without a wrapper.
pub trait SrfInstant: Copy + Add<Duration, Output = Self> + PartialOrd {}

impl<T> SrfInstant for T where T: Copy + Add<Duration, Output = T> + PartialOrd {}

/// Abstraction for the half-duplex serial line shared by all sensors.
///
/// Implementations start at the sensors' 9600 baud power-on rate. On the
/// single-wire SRF01 hookup the host hears its own transmissions; stripping
/// that echo is the implementation's job, this driver only ever sees sensor
/// traffic.
pub trait SrfSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet;
    /// hard faults are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` while the transmit buffer is
    /// full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes
    /// have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Changes the host-side serial rate.
    ///
    /// Called after a baud-change command so the host keeps up with the
    /// sensors. Reconfiguration may be blocking, hence `Result` instead of
    /// `nb::Result`.
    fn set_baud(&mut self, baud: BaudRate) -> Result<(), Self::Error>;
}

/// Abstraction for the delay and clock operations the bus timing needs.
pub trait SrfTimer {
    /// Monotonic timestamp type used for deadline arithmetic.
    type Instant: SrfInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// The current instant.
    fn now(&self) -> Self::Instant;
}
