//! Diagnostics for rejected length strings.
//!
//! Every failure is a [`Diagnostic`] with an [`ErrorCode`], a primary
//! [`Label`] on the offending text and usually a help line. Diagnostics are
//! wrapped in [`ParseError`] when returned.
//!
//! # Example
//!
//! ```
//! # use icrom_parser::{Span, error::{Diagnostic, ErrorCode, ParseError}};
//! let diag = Diagnostic::error("unknown unit `ug`")
//!     .with_code(ErrorCode::E002)
//!     .with_secondary_label(Span::new(0..2), "value")
//!     .with_label(Span::new(2..4), "not a length unit");
//!
//! let err = ParseError::from(diag);
//! assert_eq!(err.diagnostics()[0].labels().len(), 2);
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
