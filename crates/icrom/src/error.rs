//! Error types for icrom operations.
//!
//! This module provides the main error type [`IcromError`] which wraps the
//! error conditions that can occur while generating a board.

use std::io;

use thiserror::Error;

use icrom_core::eagle::WriteError;
use icrom_parser::ParseError;

use crate::data::{DataError, ReadError};

/// The main error type for icrom operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the text that failed to parse next to the
/// diagnostics, so callers can render the offending span.
#[derive(Debug, Error)]
pub enum IcromError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid {field}: {err}")]
    Parse {
        field: String,
        err: ParseError,
        src: String,
    },

    #[error("ROM data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(#[from] WriteError),
}

impl From<ReadError> for IcromError {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Io(err) => Self::Io(err),
            ReadError::Data(err) => Self::Data(err),
        }
    }
}

impl IcromError {
    /// Create a new `Parse` error for the named setting and its source text.
    pub fn new_parse_error(
        field: impl Into<String>,
        err: ParseError,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            err,
            src: src.into(),
        }
    }
}
