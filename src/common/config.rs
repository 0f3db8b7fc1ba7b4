// src/common/config.rs

use core::time::Duration;

use super::timing;

/// Baud rates selectable on the controller's RS-232 interface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BaudRate {
    /// 9600 baud (factory setting).
    #[default]
    Baud9600,
    /// 19200 baud.
    Baud19200,
    /// 38400 baud.
    Baud38400,
}

impl BaudRate {
    /// Returns the numeric baud rate value.
    pub const fn as_baud(self) -> u32 {
        match self {
            BaudRate::Baud9600 => 9600,
            BaudRate::Baud19200 => 19200,
            BaudRate::Baud38400 => 38400,
        }
    }
}

/// Line settings for one controller connection.
///
/// The character format is always 8 data bits, no parity, 1 stop bit; only the
/// rate and the per-line read timeout vary.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SerialConfig {
    pub baud_rate: BaudRate,
    /// Deadline for receiving one complete response line.
    pub read_timeout: Duration,
}

impl SerialConfig {
    pub const fn new() -> Self {
        SerialConfig {
            baud_rate: BaudRate::Baud9600,
            read_timeout: timing::DEFAULT_READ_TIMEOUT,
        }
    }

    pub const fn with_baud_rate(mut self, baud_rate: BaudRate) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub const fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Upper bound for writing `len` bytes at the configured rate.
    pub fn write_timeout(&self, len: usize) -> Duration {
        timing::byte_duration(self.baud_rate.as_baud()) * len as u32 + timing::WRITE_TIMEOUT_MARGIN
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new()
    }
}
