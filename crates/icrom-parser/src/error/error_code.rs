//! Error codes for length diagnostics.
//!
//! Codes are stable so they can be searched for and documented:
//! - `E001` - the numeric part is missing or malformed
//! - `E002` - the unit suffix is not a known unit

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid number.
    ///
    /// The input is empty, does not start with a decimal number, or the
    /// number is out of range.
    E001,

    /// Unknown unit.
    ///
    /// The text after the number is not one of the accepted unit names
    /// (`inch`, `inches`, `in`, `mil`, `mils`, `mm`, `cm`, `m`), or more text
    /// follows the unit.
    E002,
}

impl ErrorCode {
    /// Returns the code as written in diagnostics, e.g. `"E001"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
        }
    }

    /// Returns a short description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid number",
            ErrorCode::E002 => "unknown unit",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
