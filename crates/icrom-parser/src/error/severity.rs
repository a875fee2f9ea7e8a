//! How serious a diagnostic is.

use std::fmt;

/// The severity level of a diagnostic.
///
/// A length that yields an [`Severity::Error`] is rejected; a
/// [`Severity::Warning`] is reported but the parsed value is still used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` for [`Severity::Warning`].
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}
