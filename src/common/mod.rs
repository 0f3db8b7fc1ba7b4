// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod response;
pub mod status;
pub mod timing;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, CommandString};

// From config.rs
pub use config::{BaudRate, SerialConfig};

// From error.rs
pub use error::Tpg261Error;

// From frame.rs
pub use frame::{encode, CommandFrame, ACK, ENQ, NAK};

// From hal_traits.rs
pub use hal_traits::{GaugeInstant, GaugeSerial, GaugeTimer};

// From response.rs
pub use response::{decode_line, split_fields, Acknowledgement, ResponseParseError};

// From status.rs
pub use status::{decode_status, FaultList, StatusCode, StatusFamily};

// From types.rs
pub use types::{GaugeId, PressureUnit};
