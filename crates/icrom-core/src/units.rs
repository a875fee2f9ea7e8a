//! Physical length units.
//!
//! All layout arithmetic happens in millimetres. A [`Length`] remembers the
//! unit it was written in so it can be displayed the way the user typed it.
//!
//! # Example
//!
//! ```
//! # use icrom_core::units::{Length, LengthUnit};
//! let pitch = Length::new(50.0, LengthUnit::Mil);
//! assert!((pitch.mm() - 1.27).abs() < 1e-12);
//! assert_eq!(pitch.to_string(), "50 mil");
//!
//! let in_inches = pitch.to(LengthUnit::Inch);
//! assert!((in_inches - 0.05).abs() < 1e-12);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// A unit of length with a fixed conversion factor to millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// 25.4 mm
    #[serde(alias = "in", alias = "inches")]
    Inch,
    /// A thousandth of an inch, 0.0254 mm
    #[default]
    #[serde(alias = "mils")]
    Mil,
    /// Millimetre
    Mm,
    /// Centimetre, 10 mm
    Cm,
    /// Metre, 1000 mm
    M,
}

impl LengthUnit {
    /// Every accepted spelling paired with its unit.
    ///
    /// Sorted longest first so that suffix matching never stops at a prefix
    /// (`mm` before `m`, `inches` before `inch` before `in`).
    pub const NAMES: [(&'static str, LengthUnit); 8] = [
        ("inches", LengthUnit::Inch),
        ("inch", LengthUnit::Inch),
        ("mils", LengthUnit::Mil),
        ("mil", LengthUnit::Mil),
        ("in", LengthUnit::Inch),
        ("mm", LengthUnit::Mm),
        ("cm", LengthUnit::Cm),
        ("m", LengthUnit::M),
    ];

    /// Millimetres per one of this unit.
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Inch => 25.4,
            Self::Mil => 0.0254,
            Self::Mm => 1.0,
            Self::Cm => 10.0,
            Self::M => 1000.0,
        }
    }

    /// Converts a value in this unit to millimetres.
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.mm_per_unit()
    }

    /// Converts millimetres to a value in this unit.
    pub fn from_mm(self, mm: f64) -> f64 {
        mm / self.mm_per_unit()
    }

    /// Returns the canonical name of the unit.
    pub fn name(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Mil => "mil",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::M => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, unit)| *unit)
            .ok_or_else(|| format!("Unknown length unit: {s}"))
    }
}

/// A distance together with the unit it is expressed in.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    /// Creates a length of `value` expressed in `unit`.
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Creates a length from millimetres.
    pub fn from_mm(mm: f64) -> Self {
        Self::new(mm, LengthUnit::Mm)
    }

    /// Returns the numeric value in the length's own unit.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Returns the unit the length is expressed in.
    pub fn unit(self) -> LengthUnit {
        self.unit
    }

    /// Returns the length in millimetres.
    pub fn mm(self) -> f64 {
        self.unit.to_mm(self.value)
    }

    /// Returns the numeric value converted to `unit`.
    pub fn to(self, unit: LengthUnit) -> f64 {
        unit.from_mm(self.mm())
    }

    /// Returns the same distance expressed in a different unit.
    pub fn with_unit(self, unit: LengthUnit) -> Self {
        Self::new(self.to(unit), unit)
    }

    /// Returns `true` if both lengths are within `epsilon_mm` millimetres.
    pub fn approx_eq(self, other: Length, epsilon_mm: f64) -> bool {
        (self.mm() - other.mm()).abs() <= epsilon_mm
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
