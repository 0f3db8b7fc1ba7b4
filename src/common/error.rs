// src/common/error.rs

use super::command::CommandString;
use super::response::ResponseParseError;
use super::status::{FaultList, StatusCode, StatusFamily, UnknownStatus};
use super::types::PressureUnit;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Tpg261Error<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the channel implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// `connect` was called while the channel is already open.
    #[error("Already connected")]
    AlreadyConnected,

    /// An operation needing an open channel was called while it is closed.
    #[error("Not connected")]
    NotConnected,

    /// The device answered the command phase with NAK or anything other than ACK.
    #[error("Error sending '{command}'")]
    CommandRejected { command: CommandString },

    /// Read timed out or returned data that could not be parsed.
    #[error("Malformed response: {0}")]
    MalformedResponse(ResponseParseError),

    /// The device reported a status code missing from the family's table.
    #[error("Unknown {family} status code {code}")]
    UnknownStatusCode { code: StatusCode, family: StatusFamily },

    /// One or more decoded faults, in the order the device reported them.
    #[error("Following {family} error(s) occurred: {faults}")]
    DeviceFault { family: StatusFamily, faults: FaultList },

    /// The unit read back after a set differs from the requested one.
    #[error("Unable to change pressure unit: requested {requested}, device reports {confirmed}")]
    UnitMismatch {
        requested: PressureUnit,
        confirmed: PressureUnit,
    },

    /// Gauge number outside the channels the controller exposes.
    #[error("Invalid gauge number: {0}")]
    InvalidGauge(u8),

    /// Pressure unit name not recognised.
    #[error("Invalid pressure unit")]
    InvalidUnit,

    /// The channel did not accept the frame before the write deadline.
    #[error("Write timed out")]
    WriteTimeout,

    /// The command text did not fit its fixed-size buffer.
    #[error("Command formatting failed")]
    CommandFormat,
}

// Allow mapping from the underlying channel error
impl<E: core::fmt::Debug> From<E> for Tpg261Error<E> {
    fn from(e: E) -> Self {
        Tpg261Error::Io(e)
    }
}

impl<E: core::fmt::Debug> Tpg261Error<E> {
    pub(crate) fn unknown_status(status: UnknownStatus) -> Self {
        Tpg261Error::UnknownStatusCode {
            code: status.code,
            family: status.family,
        }
    }
}
