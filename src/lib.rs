// src/lib.rs

//! Driver for the Pfeiffer SingleGauge TPG 261 vacuum gauge controller.
//!
//! Each operation is a two-phase exchange over a serial line: the command
//! frame is acknowledged with ACK (or refused with NAK), then ENQ requests
//! the data line. The engine ([`SyncController`]) is blocking and runs over
//! any channel implementing [`GaugeSerial`] + [`GaugeTimer`]. With the
//! `serial` feature, [`serial::SerialInterface`] provides one backed by a
//! native serial port.
//!
//! ```no_run
//! # #[cfg(feature = "serial")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tpg261::{GaugeId, PressureUnit, SerialConfig};
//!
//! let mut gauge = tpg261::serial::controller("/dev/ttyUSB0", SerialConfig::default());
//! gauge.connect()?;
//! gauge.reset()?;
//! gauge.set_pressure_unit(PressureUnit::Pascal)?;
//! println!("{:e} {}", gauge.read_pressure(GaugeId::GAUGE_1)?, gauge.get_pressure_unit()?);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serial"))]
//! # fn main() {}
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod controller;

#[cfg(feature = "serial")]
pub mod serial;

// Re-export key types for convenience
pub use common::{
    BaudRate, GaugeId, GaugeSerial, GaugeTimer, PressureUnit, SerialConfig, StatusFamily,
    Tpg261Error,
};
pub use controller::SyncController;
