// src/serial.rs

//! Channel over a native serial port, using the `serialport` crate.

use std::io::{self, Read, Write};
use std::string::String;
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::common::{
    config::SerialConfig,
    hal_traits::{GaugeSerial, GaugeTimer},
};
use crate::controller::SyncController;

/// Port-level timeout for a single read/write call. The engine enforces the
/// line deadline itself, so this only bounds each poll.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("serial port is not open")]
    NotOpen,
}

/// Serial port channel, closed until [`GaugeSerial::open`] is called.
pub struct SerialInterface {
    path: String,
    config: SerialConfig,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialInterface {
    pub fn new(path: impl Into<String>, config: SerialConfig) -> Self {
        SerialInterface {
            path: path.into(),
            config,
            port: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>, SerialError> {
        self.port.as_mut().ok_or(SerialError::NotOpen)
    }
}

impl core::fmt::Debug for SerialInterface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialInterface")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("open", &self.port.is_some())
            .finish()
    }
}

impl GaugeSerial for SerialInterface {
    type Error = SerialError;

    fn open(&mut self) -> Result<(), Self::Error> {
        let port = serialport::new(self.path.as_str(), self.config.baud_rate.as_baud())
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(POLL_TIMEOUT)
            .open()?;
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        // Dropping the handle releases the device
        self.port.take().map(drop).ok_or(SerialError::NotOpen)
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn clear_buffers(&mut self) -> Result<(), Self::Error> {
        self.port_mut()?.clear(ClearBuffer::All)?;
        Ok(())
    }

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let port = self.port_mut()?;
        let mut byte = [0u8; 1];
        match port.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Err(nb::Error::WouldBlock)
            }
            Err(e) => Err(nb::Error::Other(e.into())),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        let port = self.port_mut()?;
        match port.write(&[byte]) {
            Ok(1) => Ok(()),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Err(nb::Error::WouldBlock)
            }
            Err(e) => Err(nb::Error::Other(e.into())),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        let port = self.port_mut()?;
        match port.flush() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e.into())),
        }
    }
}

impl GaugeTimer for SerialInterface {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

/// Builds an unconnected controller for the port at `path`.
pub fn controller(
    path: impl Into<String>,
    config: SerialConfig,
) -> SyncController<SerialInterface> {
    SyncController::with_config(SerialInterface::new(path, config), config)
}
