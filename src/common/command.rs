//! Controller command definitions.
//!
//! Every command is a mnemonic, optionally followed by `,` and a numeric
//! parameter. The gauge selector of `PR` is part of the mnemonic itself
//! (`PR1`, `PR2`), not a parameter.

use arrayvec::ArrayString;
use core::fmt::{self, Write};

use super::frame::{self, CommandFrame, FrameCapacityError};
use super::types::{GaugeId, PressureUnit};

/// Capacity for a command's text form (without terminator).
pub const COMMAND_CAPACITY: usize = 12;

/// Command text as shown in logs and errors, e.g. `"UNI,2"`.
pub type CommandString = ArrayString<COMMAND_CAPACITY>;

/// Represents a controller command.
///
/// The `Display` implementation produces the command text without the
/// terminator (e.g. `RES`, `PR1`, `UNI,2`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset / self-test (`RES`) - Returns one diagnostic code per subsystem.
    Reset,

    /// Pressure measurement (`PR1`, `PR2`) - Returns status and value.
    ReadPressure { gauge: GaugeId },

    /// Query the pressure unit (`UNI`).
    QueryUnit,

    /// Set the pressure unit (`UNI,n`) - The device answers with the new unit.
    SetUnit { unit: PressureUnit },
}

impl Command {
    /// Mnemonic including any directly appended selector.
    pub fn mnemonic(&self) -> ArrayString<4> {
        let mut out = ArrayString::new();
        match self {
            Command::Reset => out.push_str("RES"),
            Command::ReadPressure { gauge } => {
                out.push_str("PR");
                // GaugeId is always a single digit
                out.push(char::from(b'0' + gauge.number()));
            }
            Command::QueryUnit | Command::SetUnit { .. } => out.push_str("UNI"),
        }
        out
    }

    /// Comma-separated parameter, if the command carries one.
    pub fn parameter(&self) -> Option<u32> {
        match self {
            Command::SetUnit { unit } => Some(unit.code() as u32),
            _ => None,
        }
    }

    /// Encodes the full frame, terminator included.
    pub fn format_into(&self) -> Result<CommandFrame, FrameCapacityError> {
        frame::encode(&self.mnemonic(), self.parameter())
    }

    /// Text form for error reporting.
    pub fn to_command_string(&self) -> CommandString {
        let mut out = CommandString::new();
        // Longest form is "UNI,2", well inside the capacity
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic())?;
        if let Some(value) = self.parameter() {
            write!(f, ",{}", value)?;
        }
        Ok(())
    }
}
