// src/common/response.rs

use core::str::FromStr;

use super::frame::{ACK, CR, LF, NAK};
use super::status::StatusCode;

/// Most comma-separated fields accepted in one response line.
pub const MAX_FIELDS: usize = 32;

/// Fields of one response line, in wire order.
pub type Fields<'a> = heapless::Vec<&'a str, MAX_FIELDS>;

/// Error type specific to response reading and parsing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ResponseParseError {
    /// Nothing was received before the read deadline.
    #[error("no data received before timeout")]
    NoData,
    /// Bytes were received but no <CR><LF> arrived before the deadline.
    #[error("line not terminated before timeout")]
    MissingTerminator,
    /// The line did not fit into the read buffer.
    #[error("line exceeds {capacity} bytes")]
    LineTooLong { capacity: usize },
    /// Could not decode line content as UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// A field could not be parsed as the expected number.
    #[error("invalid numeric field")]
    InvalidNumber,
    /// The line has a different number of fields than the command returns.
    #[error("expected {expected} field(s), got {got}")]
    UnexpectedFieldCount { expected: usize, got: usize },
    /// More fields than [`MAX_FIELDS`].
    #[error("too many fields")]
    TooManyFields,
}

impl From<core::str::Utf8Error> for ResponseParseError {
    fn from(_: core::str::Utf8Error) -> Self {
        ResponseParseError::InvalidUtf8
    }
}

/// Outcome of the command phase, as read from the first response line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Acknowledgement {
    Ack,
    Nak,
    /// Anything else; treated like a NAK by the engine.
    Unexpected,
}

impl Acknowledgement {
    pub fn classify(line: &str) -> Self {
        match line.as_bytes() {
            [ACK] => Acknowledgement::Ack,
            [NAK] => Acknowledgement::Nak,
            _ => Acknowledgement::Unexpected,
        }
    }
}

/// Strips trailing <CR>/<LF> bytes and returns the line as text.
///
/// An empty line (nothing but terminators, or no bytes at all) means the
/// device sent nothing useful before the timeout.
pub fn decode_line(raw: &[u8]) -> Result<&str, ResponseParseError> {
    let end = raw
        .iter()
        .rposition(|&b| b != CR && b != LF)
        .map(|i| i + 1)
        .ok_or(ResponseParseError::NoData)?;
    Ok(core::str::from_utf8(&raw[..end])?)
}

/// Splits a decoded line on `,`, trimming whitespace around each field.
pub fn split_fields(text: &str) -> Result<Fields<'_>, ResponseParseError> {
    let mut fields = Fields::new();
    for field in text.split(',') {
        fields
            .push(field.trim())
            .map_err(|_| ResponseParseError::TooManyFields)?;
    }
    Ok(fields)
}

/// Like [`split_fields`] but requires exactly `expected` fields.
pub fn split_exact(text: &str, expected: usize) -> Result<Fields<'_>, ResponseParseError> {
    let fields = split_fields(text)?;
    if fields.len() != expected {
        return Err(ResponseParseError::UnexpectedFieldCount {
            expected,
            got: fields.len(),
        });
    }
    Ok(fields)
}

/// Parses a status or unit code field.
pub fn parse_code(field: &str) -> Result<StatusCode, ResponseParseError> {
    StatusCode::from_str(field.trim()).map_err(|_| ResponseParseError::InvalidNumber)
}

/// Parses a measurement field such as `1.0000E-02`.
pub fn parse_value(field: &str) -> Result<f64, ResponseParseError> {
    f64::from_str(field.trim()).map_err(|_| ResponseParseError::InvalidNumber)
}
