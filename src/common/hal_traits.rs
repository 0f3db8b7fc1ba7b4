// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

/// Point in time as reported by a [`GaugeTimer`].
///
/// Only ordering and adding a `Duration` are needed to compute deadlines.
pub trait GaugeInstant: Copy + PartialOrd + Add<Duration, Output = Self> {}

impl<T> GaugeInstant for T where T: Copy + PartialOrd + Add<Duration, Output = T> {}

/// Abstraction for the clock and delay operations the protocol engine needs.
pub trait GaugeTimer {
    type Instant: GaugeInstant;

    /// Returns the current time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);
}

/// Abstraction for the byte channel connected to the controller.
///
/// The lifecycle calls (`open`, `close`, `clear_buffers`) are blocking. The byte
/// primitives are non-blocking in the `nb` style so the engine can enforce its
/// own deadlines.
pub trait GaugeSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Opens the underlying channel.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Closes the underlying channel.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Returns whether the channel is currently open.
    fn is_open(&self) -> bool;

    /// Discards any unread input and unsent output.
    fn clear_buffers(&mut self) -> Result<(), Self::Error>;

    /// Attempts to read a single byte.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the transmit buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
