//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, labeled spans of the parsed text, and help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E001]: invalid number `1.2.3`
///  1 | 1.2.3mm
///    | ^^^^^ expected a decimal number
///    = help: write lengths like `10`, `2.5mm` or `0.1 inch`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use icrom_parser::{Span, error::{Diagnostic, ErrorCode}};
    /// let diag = Diagnostic::error("unknown unit `ug`")
    ///     .with_code(ErrorCode::E002)
    ///     .with_label(Span::new(2..4), "not a length unit")
    ///     .with_help("use one of: inch, mil, mm, cm, m");
    ///
    /// assert_eq!(diag.to_string(), "error[E002]: unknown unit `ug`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the first primary label, if any.
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.iter().find(|label| label.is_primary())
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults() {
        let diag = Diagnostic::error("empty length");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "empty length");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.primary_label().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("unknown unit `ug`")
            .with_secondary_label(Span::new(0..2), "value")
            .with_label(Span::new(2..4), "not a length unit");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_secondary());
        let primary = diag.primary_label().unwrap();
        assert_eq!(primary.span(), Span::new(2..4));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("invalid number `x`").with_code(ErrorCode::E001);
        assert_eq!(with_code.to_string(), "error[E001]: invalid number `x`");

        let warning = Diagnostic::warning("negative length").with_help("use a positive value");
        assert_eq!(warning.to_string(), "warning: negative length");
        assert_eq!(warning.help(), Some("use a positive value"));
    }
}
