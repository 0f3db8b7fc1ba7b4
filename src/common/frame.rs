// src/common/frame.rs

use arrayvec::ArrayString;
use core::fmt::Write;

// --- Control bytes ---

pub const CR: u8 = 0x0d;
pub const LF: u8 = 0x0a;
/// Requests the pending data line after an acknowledged command.
pub const ENQ: u8 = 0x05;
/// Positive acknowledgment of a command frame.
pub const ACK: u8 = 0x06;
/// Negative acknowledgment of a command frame.
pub const NAK: u8 = 0x15;

/// Two-byte sequence terminating every command frame and response line.
pub const TERMINATOR: [u8; 2] = [CR, LF];

/// Longest command frame the driver produces, terminator included.
pub const FRAME_CAPACITY: usize = 16;

/// An encoded command frame, ready to be written to the channel.
pub type CommandFrame = ArrayString<FRAME_CAPACITY>;

/// Error returned when a frame does not fit into [`CommandFrame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameCapacityError;

/// Builds `mnemonic[,parameter]<CR><LF>`.
pub fn encode(mnemonic: &str, parameter: Option<u32>) -> Result<CommandFrame, FrameCapacityError> {
    let mut frame = CommandFrame::new();
    frame.try_push_str(mnemonic).map_err(|_| FrameCapacityError)?;
    if let Some(value) = parameter {
        write!(frame, ",{}", value).map_err(|_| FrameCapacityError)?;
    }
    frame.try_push('\r').map_err(|_| FrameCapacityError)?;
    frame.try_push('\n').map_err(|_| FrameCapacityError)?;
    Ok(frame)
}
