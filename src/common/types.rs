// src/common/types.rs

use core::fmt;
use core::str::FromStr;

use super::error::Tpg261Error;

// --- Gauge selection ---

/// Selects one of the sensor channels on the controller (`PR1`, `PR2`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GaugeId(u8);

impl GaugeId {
    pub const GAUGE_1: GaugeId = GaugeId(1);
    pub const GAUGE_2: GaugeId = GaugeId(2);

    /// Creates a new `GaugeId` if `number` names a channel the controller exposes.
    /// Validation cannot cause an I/O error, hence `Tpg261Error<()>`.
    pub fn new(number: u8) -> Result<Self, Tpg261Error<()>> {
        if Self::is_valid_number(number) {
            Ok(GaugeId(number))
        } else {
            Err(Tpg261Error::InvalidGauge(number))
        }
    }

    #[inline]
    pub const fn number(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid_number(number: u8) -> bool {
        matches!(number, 1..=2)
    }
}

impl Default for GaugeId {
    fn default() -> Self {
        Self::GAUGE_1
    }
}

impl TryFrom<u8> for GaugeId {
    type Error = Tpg261Error<()>;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        GaugeId::new(number)
    }
}

impl fmt::Display for GaugeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Pressure unit ---

/// Pressure unit the controller reports readings in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum PressureUnit {
    Bar = 0,
    Torr = 1,
    Pascal = 2,
}

impl PressureUnit {
    /// Wire code used by the `UNI` command.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Tries to convert a wire code into a `PressureUnit`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PressureUnit::Bar),
            1 => Some(PressureUnit::Torr),
            2 => Some(PressureUnit::Pascal),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::Torr => "torr",
            PressureUnit::Pascal => "pa",
        }
    }
}

impl FromStr for PressureUnit {
    type Err = Tpg261Error<()>;

    /// Accepts `bar`, `torr`, `pa` and `pascal` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("bar") {
            Ok(PressureUnit::Bar)
        } else if s.eq_ignore_ascii_case("torr") {
            Ok(PressureUnit::Torr)
        } else if s.eq_ignore_ascii_case("pa") || s.eq_ignore_ascii_case("pascal") {
            Ok(PressureUnit::Pascal)
        } else {
            Err(Tpg261Error::InvalidUnit)
        }
    }
}

impl TryFrom<&str> for PressureUnit {
    type Error = Tpg261Error<()>;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
