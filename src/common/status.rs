// src/common/status.rs

use core::fmt;

use super::response::MAX_FIELDS;

/// Numeric status or unit code as sent by the device.
pub type StatusCode = u16;

/// Status codes are scoped per command family; the same number means
/// different things for `RES` and `PRx`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StatusFamily {
    /// Self-test diagnostics returned by `RES`.
    Reset,
    /// Measurement status returned by `PRx`.
    Pressure,
    /// Unit code returned by `UNI`.
    Unit,
}

impl StatusFamily {
    /// Fault table for this family. Code 0 (success) is never listed.
    pub const fn table(self) -> &'static [(StatusCode, &'static str)] {
        match self {
            StatusFamily::Reset => RESET_FAULTS,
            StatusFamily::Pressure => PRESSURE_FAULTS,
            StatusFamily::Unit => &[],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFamily::Reset => "reset",
            StatusFamily::Pressure => "pressure",
            StatusFamily::Unit => "unit",
        }
    }
}

impl fmt::Display for StatusFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Tables ---

const RESET_FAULTS: &[(StatusCode, &str)] = &[
    (1, "Watchdog has responded"),
    (2, "Task fail error"),
    (3, "EPROM error"),
    (4, "RAM error"),
    (5, "EEPROM error"),
    (6, "DISPLAY error"),
    (7, "A/D converter error"),
    (9, "Gauge 1 error (e.g. filament rupture, no supply)"),
    (10, "Gauge 1 identification error"),
    (11, "Gauge 2 error (e.g. filament rupture, no supply)"),
    (12, "Gauge 2 identification error"),
];

const PRESSURE_FAULTS: &[(StatusCode, &str)] = &[
    (1, "Underrange"),
    (2, "Overrange"),
    (3, "Sensor error"),
    (4, "Sensor off"),
    (5, "No sensor"),
    (6, "Identification error"),
];

/// A status code that is absent from its family's table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnknownStatus {
    pub code: StatusCode,
    pub family: StatusFamily,
}

/// Looks up one status code.
///
/// Returns `Ok(None)` for success (0), `Ok(Some(description))` for a known
/// fault.
pub fn decode_status(
    family: StatusFamily,
    code: StatusCode,
) -> Result<Option<&'static str>, UnknownStatus> {
    if code == 0 {
        return Ok(None);
    }
    family
        .table()
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| Some(*description))
        .ok_or(UnknownStatus { code, family })
}

/// Decodes every code and collects the faults in the order reported.
///
/// The first code missing from the table aborts decoding.
pub fn collect_faults<I>(family: StatusFamily, codes: I) -> Result<FaultList, UnknownStatus>
where
    I: IntoIterator<Item = StatusCode>,
{
    let mut faults = FaultList::new();
    for code in codes {
        if let Some(description) = decode_status(family, code)? {
            faults.push(description);
        }
    }
    Ok(faults)
}

/// Decoded fault descriptions, in first-occurring order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultList(heapless::Vec<&'static str, MAX_FIELDS>);

impl FaultList {
    pub fn new() -> Self {
        FaultList(heapless::Vec::new())
    }

    /// Builds a list holding a single description.
    pub fn single(description: &'static str) -> Self {
        let mut faults = Self::new();
        faults.push(description);
        faults
    }

    // Callers never produce more entries than response fields
    fn push(&mut self, description: &'static str) {
        let _ = self.0.push(description);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for FaultList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, description) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(description)?;
        }
        Ok(())
    }
}
