//! # icrom parser
//!
//! Parses the physical lengths accepted on the command line and in config
//! files (`10`, `2.5mm`, `0.1 inch`) and reports malformed input as
//! located diagnostics.
//!
//! ## Usage
//!
//! ```
//! # use icrom_core::units::LengthUnit;
//! # use icrom_parser::{parse_length, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let width = parse_length("3.9 inch", LengthUnit::Mil)?;
//!     assert!((width.mm() - 99.06).abs() < 1e-9);
//!     Ok(())
//! }
//! ```

pub mod error;
mod length;
mod span;

pub use error::ParseError;
pub use length::parse_length;
pub use span::Span;
