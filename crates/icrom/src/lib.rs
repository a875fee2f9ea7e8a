//! icrom - Eagle board generator for inductively-coupled ROM arrays.
//!
//! A bit matrix is encoded as the routing of sense lines across jogged word
//! lines: each bit line picks one of two crossing tracks per word. This crate
//! resolves the configuration, lays the board out and serializes it as an
//! Eagle 6.5 board file.

pub mod config;
pub mod data;
pub mod layout;

mod error;
mod export;

pub use icrom_core::{eagle, geometry, units};

pub use error::IcromError;

use std::io::{Read, Write};

use log::{debug, trace};

use config::{AppConfig, BoardParams};
use data::{DataLayout, RomData};
use eagle::BoardFile;
use export::{Exporter, XmlExporter};
use layout::LayoutSummary;

/// Builder for generating ROM boards.
///
/// Each operation resolves the configuration first, so a malformed length or
/// an inconsistent geometry is reported by the first call that needs it.
///
/// # Examples
///
/// ```rust
/// use icrom::{BoardBuilder, config::AppConfig, data::RomData};
///
/// let mut config = AppConfig::default();
/// config.array_mut().set_words(2);
/// config.array_mut().set_bits(8);
///
/// let builder = BoardBuilder::new(config);
///
/// // One byte per word
/// let data = builder.load_data(&[0xA5u8, 0x3C][..]).expect("two bytes");
///
/// let xml = builder.render(&data).expect("board renders");
/// assert!(xml.contains("<signal name=\"bit007\">"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    config: AppConfig,
}

impl BoardBuilder {
    /// Create a new board builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use icrom::{BoardBuilder, config::AppConfig};
    ///
    /// let builder = BoardBuilder::new(AppConfig::default());
    /// assert_eq!(builder.params().unwrap().words, 64);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve the configuration into millimetre parameters.
    ///
    /// # Errors
    ///
    /// Returns `IcromError` if a length does not parse or the resulting
    /// geometry is inconsistent.
    pub fn params(&self) -> Result<BoardParams, IcromError> {
        self.config.resolve()
    }

    /// Read ROM data for the configured array from `reader`.
    ///
    /// # Errors
    ///
    /// Returns `IcromError` for configuration or I/O failures, or if the
    /// input does not hold exactly `words × bits` bits in the configured
    /// layout.
    pub fn load_data<R: Read>(&self, reader: R) -> Result<RomData, IcromError> {
        let params = self.params()?;
        let layout = DataLayout::from_stride(params.stride);
        let data = RomData::read_from(reader, params.words, params.bits, layout)?;
        debug!(ones = data.ones(), layout:?; "ROM data loaded");
        Ok(data)
    }

    /// Lay out a board for `data`.
    ///
    /// # Errors
    ///
    /// Returns `IcromError::Data` if `data` does not have the configured
    /// dimensions, or a configuration error.
    pub fn build(&self, data: &RomData) -> Result<BoardFile, IcromError> {
        let params = self.params()?;
        self.build_with(&params, data)
    }

    /// Counts describing a board produced by [`BoardBuilder::build`].
    ///
    /// # Errors
    ///
    /// Returns `IcromError` if the configuration does not resolve.
    pub fn summary(&self, file: &BoardFile) -> Result<LayoutSummary, IcromError> {
        Ok(LayoutSummary::of(&self.params()?, file.drawing()))
    }

    /// Lay out a board for `data` and render it as Eagle XML.
    ///
    /// # Errors
    ///
    /// Returns `IcromError` for configuration, layout or serialization
    /// errors.
    pub fn render(&self, data: &RomData) -> Result<String, IcromError> {
        let file = self.build(data)?;
        export::render(&file)
    }

    /// Lay out a board for `data` and write it as Eagle XML to `writer`.
    ///
    /// Returns the summary of the written board.
    ///
    /// # Errors
    ///
    /// Returns `IcromError` for configuration, layout, serialization or I/O
    /// errors.
    pub fn write_to<W: Write>(
        &self,
        data: &RomData,
        writer: W,
    ) -> Result<LayoutSummary, IcromError> {
        let params = self.params()?;
        let file = self.build_with(&params, data)?;
        let mut exporter = XmlExporter::new(writer);
        exporter.export_board(&file)?;
        Ok(LayoutSummary::of(&params, file.drawing()))
    }

    fn build_with(&self, params: &BoardParams, data: &RomData) -> Result<BoardFile, IcromError> {
        let file = layout::generate(params, data)?;
        trace!(summary:? = LayoutSummary::of(params, file.drawing()); "Board built");
        Ok(file)
    }
}
