//! Configuration types for board generation.
//!
//! This module provides the configuration structures that describe the
//! array and its physical dimensions. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file; every
//! section and field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - top-level configuration as written by the user, with
//!   lengths in any unit.
//! - [`LengthSpec`] - a length as written: a bare number in the default
//!   unit, or a string with an optional unit suffix.
//! - [`BoardParams`] - the resolved configuration with every length in
//!   millimetres, as consumed by the layout.
//!
//! # Example
//!
//! ```
//! # use icrom::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     unit = "mil"
//!
//!     [array]
//!     words = 16
//!     bits = 8
//!
//!     [drive]
//!     pitch = "1.27mm"
//! "#).unwrap();
//!
//! let params = config.resolve().unwrap();
//! assert_eq!(params.words, 16);
//! assert!((params.drive_pitch - 1.27).abs() < 1e-9);
//! assert!((params.drive_trace - 0.254).abs() < 1e-9);
//! ```

use log::debug;
use serde::Deserialize;

use icrom_core::{
    eagle::{Layers, layer},
    geometry::{Bounds, Point},
    units::{Length, LengthUnit},
};
use icrom_parser::parse_length;

use crate::{error::IcromError, layout::Geometry};

/// A length as written in a config file or on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LengthSpec {
    /// A bare number in the configured default unit.
    Number(f64),
    /// A string such as `"10"`, `"1.27mm"` or `"0.1 inch"`.
    Text(String),
}

impl LengthSpec {
    /// Resolves the length, using `default_unit` when none is given.
    pub fn resolve(&self, default_unit: LengthUnit) -> Result<Length, icrom_parser::ParseError> {
        match self {
            Self::Number(value) => Ok(Length::new(*value, default_unit)),
            Self::Text(text) => parse_length(text, default_unit),
        }
    }

    fn resolve_mm(&self, field: &str, default_unit: LengthUnit) -> Result<f64, IcromError> {
        self.resolve(default_unit).map(Length::mm).map_err(|err| {
            let src = match self {
                Self::Number(value) => value.to_string(),
                Self::Text(text) => text.clone(),
            };
            IcromError::new_parse_error(field, err, src)
        })
    }
}

impl From<f64> for LengthSpec {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LengthSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for LengthSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Unit for lengths given without one.
    unit: LengthUnit,
    array: ArrayConfig,
    board: BoardConfig,
    drive: DriveConfig,
    sense: SenseConfig,
    pads: PadConfig,
    labels: LabelConfig,
    outline: OutlineConfig,
}

impl AppConfig {
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: LengthUnit) {
        self.unit = unit;
    }

    pub fn array(&self) -> &ArrayConfig {
        &self.array
    }

    pub fn array_mut(&mut self) -> &mut ArrayConfig {
        &mut self.array
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut BoardConfig {
        &mut self.board
    }

    pub fn drive(&self) -> &DriveConfig {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut DriveConfig {
        &mut self.drive
    }

    pub fn sense(&self) -> &SenseConfig {
        &self.sense
    }

    pub fn sense_mut(&mut self) -> &mut SenseConfig {
        &mut self.sense
    }

    pub fn pads(&self) -> &PadConfig {
        &self.pads
    }

    pub fn pads_mut(&mut self) -> &mut PadConfig {
        &mut self.pads
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut LabelConfig {
        &mut self.labels
    }

    pub fn outline(&self) -> &OutlineConfig {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut OutlineConfig {
        &mut self.outline
    }

    /// Resolves every length to millimetres and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`IcromError::Parse`] for a malformed length and
    /// [`IcromError::Config`] when the geometry is inconsistent (see
    /// [`BoardParams::validate`]).
    pub fn resolve(&self) -> Result<BoardParams, IcromError> {
        let unit = self.unit;
        let params = BoardParams {
            words: self.array.words,
            bits: self.array.bits,
            stride: self.array.stride,
            unit,
            width: self.board.width.resolve_mm("board width", unit)?,
            length: self.board.length.resolve_mm("board length", unit)?,
            drive_layer: self.drive.layer,
            drive_trace: self.drive.trace.resolve_mm("drive trace", unit)?,
            drive_space: self.drive.space.resolve_mm("drive space", unit)?,
            drive_pitch: self.drive.pitch.resolve_mm("drive pitch", unit)?,
            coupling: self.drive.coupling.resolve_mm("coupling length", unit)?,
            sense_layer: self.sense.layer,
            sense_trace: self.sense.trace.resolve_mm("sense trace", unit)?,
            sense_pitch: self.sense.pitch.resolve_mm("sense pitch", unit)?,
            pad_drill: self.pads.drill.resolve_mm("pad drill", unit)?,
            pad_annular_ring: self.pads.annular_ring.resolve_mm("pad annular ring", unit)?,
            pad_clearance: self.pads.clearance.resolve_mm("pad clearance", unit)?,
            labels: LabelParams {
                enabled: self.labels.enabled,
                layer: self.labels.layer,
                size: self.labels.size.resolve_mm("label size", unit)?,
                ratio: self.labels.ratio,
                title: self.labels.title.clone(),
            },
            array_frame: self.outline.array_frame,
        };
        params.validate()?;
        debug!(params:?; "Configuration resolved");
        Ok(params)
    }
}

/// `[array]`: dimensions of the bit matrix and the input layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    words: usize,
    bits: usize,
    /// Bytes per word in the input file; packed when unset.
    stride: Option<usize>,
}

impl ArrayConfig {
    pub fn words(&self) -> usize {
        self.words
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn stride(&self) -> Option<usize> {
        self.stride
    }

    pub fn set_words(&mut self, words: usize) {
        self.words = words;
    }

    pub fn set_bits(&mut self, bits: usize) {
        self.bits = bits;
    }

    pub fn set_stride(&mut self, stride: Option<usize>) {
        self.stride = stride;
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            words: 64,
            bits: 64,
            stride: None,
        }
    }
}

/// `[board]`: outline size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    width: LengthSpec,
    length: LengthSpec,
}

impl BoardConfig {
    pub fn set_width(&mut self, width: impl Into<LengthSpec>) {
        self.width = width.into();
    }

    pub fn set_length(&mut self, length: impl Into<LengthSpec>) {
        self.length = length.into();
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: "3900mil".into(),
            length: "3900mil".into(),
        }
    }
}

/// `[drive]`: word lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    layer: u8,
    trace: LengthSpec,
    space: LengthSpec,
    pitch: LengthSpec,
    /// Height of the jog each word line makes at every bit column.
    coupling: LengthSpec,
}

impl DriveConfig {
    pub fn layer(&self) -> u8 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: u8) {
        self.layer = layer;
    }

    pub fn set_trace(&mut self, trace: impl Into<LengthSpec>) {
        self.trace = trace.into();
    }

    pub fn set_space(&mut self, space: impl Into<LengthSpec>) {
        self.space = space.into();
    }

    pub fn set_pitch(&mut self, pitch: impl Into<LengthSpec>) {
        self.pitch = pitch.into();
    }

    pub fn set_coupling(&mut self, coupling: impl Into<LengthSpec>) {
        self.coupling = coupling.into();
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            layer: layer::TOP,
            trace: "10mil".into(),
            space: "10mil".into(),
            pitch: "50mil".into(),
            coupling: "20mil".into(),
        }
    }
}

/// `[sense]`: bit lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SenseConfig {
    layer: u8,
    trace: LengthSpec,
    pitch: LengthSpec,
}

impl SenseConfig {
    pub fn layer(&self) -> u8 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: u8) {
        self.layer = layer;
    }

    pub fn set_trace(&mut self, trace: impl Into<LengthSpec>) {
        self.trace = trace.into();
    }

    pub fn set_pitch(&mut self, pitch: impl Into<LengthSpec>) {
        self.pitch = pitch.into();
    }
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            layer: layer::BOTTOM,
            trace: "10mil".into(),
            pitch: "50mil".into(),
        }
    }
}

/// `[pads]`: terminal vias at the ends of every line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    drill: LengthSpec,
    annular_ring: LengthSpec,
    clearance: LengthSpec,
}

impl PadConfig {
    pub fn set_drill(&mut self, drill: impl Into<LengthSpec>) {
        self.drill = drill.into();
    }
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            drill: "42mil".into(),
            annular_ring: "10mil".into(),
            clearance: "10mil".into(),
        }
    }
}

/// `[labels]`: silkscreen text next to the pads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    enabled: bool,
    layer: u8,
    size: LengthSpec,
    ratio: u8,
    title: Option<String>,
}

impl LabelConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            layer: layer::T_PLACE,
            size: "32mil".into(),
            ratio: 8,
            title: None,
        }
    }
}

/// `[outline]`: documentation drawn around the array.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    array_frame: bool,
}

impl OutlineConfig {
    pub fn array_frame(&self) -> bool {
        self.array_frame
    }

    pub fn set_array_frame(&mut self, array_frame: bool) {
        self.array_frame = array_frame;
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self { array_frame: true }
    }
}

/// Resolved label settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelParams {
    pub enabled: bool,
    pub layer: u8,
    /// Character height in millimetres.
    pub size: f64,
    pub ratio: u8,
    pub title: Option<String>,
}

/// The resolved board configuration. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardParams {
    pub words: usize,
    pub bits: usize,
    pub stride: Option<usize>,
    /// The unit lengths were written in, used for messages.
    pub unit: LengthUnit,
    pub width: f64,
    pub length: f64,
    pub drive_layer: u8,
    pub drive_trace: f64,
    pub drive_space: f64,
    pub drive_pitch: f64,
    pub coupling: f64,
    pub sense_layer: u8,
    pub sense_trace: f64,
    pub sense_pitch: f64,
    pub pad_drill: f64,
    pub pad_annular_ring: f64,
    pub pad_clearance: f64,
    pub labels: LabelParams,
    pub array_frame: bool,
}

impl BoardParams {
    /// Checks that the trace and pad geometry is consistent.
    ///
    /// Rejects:
    /// - an empty array
    /// - non-positive widths, pitches, drill, board size or label size
    /// - negative spacing, annular ring or clearance
    /// - drive and sense on the same layer, or a layer that is not copper
    /// - a sense pitch that cannot hold three traces
    /// - a drive pitch that cannot hold the jog plus trace and space
    /// - an array that, with its pads, does not fit on the board
    pub fn validate(&self) -> Result<(), IcromError> {
        if self.words == 0 || self.bits == 0 {
            return Err(config_error(format!(
                "array must have at least one word and one bit (got {}x{})",
                self.words, self.bits
            )));
        }

        for (name, value) in [
            ("board width", self.width),
            ("board length", self.length),
            ("drive trace", self.drive_trace),
            ("drive pitch", self.drive_pitch),
            ("coupling length", self.coupling),
            ("sense trace", self.sense_trace),
            ("sense pitch", self.sense_pitch),
            ("pad drill", self.pad_drill),
            ("label size", self.labels.size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(config_error(format!(
                    "{name} must be positive (got {})",
                    self.display(value)
                )));
            }
        }
        for (name, value) in [
            ("drive space", self.drive_space),
            ("pad annular ring", self.pad_annular_ring),
            ("pad clearance", self.pad_clearance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_error(format!(
                    "{name} must not be negative (got {})",
                    self.display(value)
                )));
            }
        }

        let layers = Layers::standard();
        for (name, number) in [
            ("drive layer", self.drive_layer),
            ("sense layer", self.sense_layer),
        ] {
            if !layers.get(number).is_some_and(|l| l.is_copper()) {
                return Err(config_error(format!(
                    "{name} {number} is not a copper layer (1-16)"
                )));
            }
        }
        if self.drive_layer == self.sense_layer {
            return Err(config_error(format!(
                "drive and sense traces must be on different layers (both on {})",
                self.drive_layer
            )));
        }
        if !layers.contains(self.labels.layer) {
            return Err(config_error(format!(
                "label layer {} is not defined",
                self.labels.layer
            )));
        }

        if self.sense_pitch <= 3.0 * self.sense_trace {
            return Err(config_error(format!(
                "sense pitch {} cannot hold three {} traces",
                self.display(self.sense_pitch),
                self.display(self.sense_trace)
            )));
        }
        let jog = self.coupling + self.drive_trace + self.drive_space;
        if self.drive_pitch <= jog {
            return Err(config_error(format!(
                "drive pitch {} must exceed coupling length plus drive trace and space ({})",
                self.display(self.drive_pitch),
                self.display(jog)
            )));
        }

        let footprint = Geometry::new(self).footprint();
        let board = Bounds::new(Point::new(0.0, 0.0), Point::new(self.width, self.length));
        if !board.contains_bounds(footprint) {
            return Err(config_error(format!(
                "a {}x{} array with its pads needs {} x {} but the board is {} x {}",
                self.words,
                self.bits,
                self.display(footprint.width()),
                self.display(footprint.height()),
                self.display(self.width),
                self.display(self.length)
            )));
        }

        Ok(())
    }

    /// Formats a millimetre value in the configured unit.
    pub fn display(&self, mm: f64) -> String {
        format!("{:.3} {}", self.unit.from_mm(mm), self.unit)
    }
}

fn config_error(message: String) -> IcromError {
    IcromError::Config(message)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn default_params() -> BoardParams {
        AppConfig::default().resolve().unwrap()
    }

    fn expect_config_error(params: &BoardParams, needle: &str) {
        match params.validate() {
            Err(IcromError::Config(message)) => {
                assert!(message.contains(needle), "{message:?} lacks {needle:?}")
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_resolve() {
        let params = default_params();
        assert_eq!(params.words, 64);
        assert_eq!(params.bits, 64);
        assert_eq!(params.stride, None);
        assert_eq!(params.unit, LengthUnit::Mil);
        assert_approx_eq!(f64, params.width, 99.06, epsilon = 1e-9);
        assert_approx_eq!(f64, params.drive_pitch, 1.27, epsilon = 1e-9);
        assert_approx_eq!(f64, params.pad_drill, 1.0668, epsilon = 1e-9);
        assert_eq!(params.drive_layer, layer::TOP);
        assert_eq!(params.sense_layer, layer::BOTTOM);
        assert!(params.labels.enabled);
        assert_eq!(params.labels.layer, layer::T_PLACE);
        assert!(params.array_frame);
    }

    #[test]
    fn test_numbers_use_configured_unit() {
        let config: AppConfig = toml::from_str(
            r#"
            unit = "mm"
            [array]
            words = 8
            bits = 8
            [board]
            width = 80
            length = "3 inch"
            "#,
        )
        .unwrap();
        let params = config.resolve().unwrap();
        assert_approx_eq!(f64, params.width, 80.0);
        assert_approx_eq!(f64, params.length, 76.2, epsilon = 1e-9);
        // defaults carry their own unit
        assert_approx_eq!(f64, params.drive_trace, 0.254, epsilon = 1e-9);
    }

    #[test]
    fn test_unit_aliases_in_toml() {
        let config: AppConfig = toml::from_str(r#"unit = "inches""#).unwrap();
        assert_eq!(config.unit(), LengthUnit::Inch);
        let config: AppConfig = toml::from_str(r#"unit = "in""#).unwrap();
        assert_eq!(config.unit(), LengthUnit::Inch);
    }

    #[test]
    fn test_malformed_length_is_a_parse_error() {
        let mut config = AppConfig::default();
        config.drive_mut().set_trace("37ug");
        match config.resolve() {
            Err(IcromError::Parse { field, src, err }) => {
                assert_eq!(field, "drive trace");
                assert_eq!(src, "37ug");
                assert_eq!(err.diagnostics().len(), 1);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_array() {
        let mut params = default_params();
        params.bits = 0;
        expect_config_error(&params, "at least one word");
    }

    #[test]
    fn test_rejects_non_positive_trace() {
        let mut params = default_params();
        params.sense_trace = 0.0;
        expect_config_error(&params, "sense trace must be positive");

        let mut params = default_params();
        params.drive_pitch = f64::NAN;
        expect_config_error(&params, "drive pitch must be positive");
    }

    #[test]
    fn test_rejects_negative_space() {
        let mut params = default_params();
        params.drive_space = -0.1;
        expect_config_error(&params, "drive space must not be negative");
    }

    #[test]
    fn test_rejects_crowded_sense_pitch() {
        let mut params = default_params();
        params.sense_trace = params.sense_pitch / 3.0;
        expect_config_error(&params, "cannot hold three");
    }

    #[test]
    fn test_rejects_crowded_drive_pitch() {
        let mut params = default_params();
        params.coupling = params.drive_pitch;
        expect_config_error(&params, "must exceed coupling length");
    }

    #[test]
    fn test_rejects_shared_layer() {
        let mut params = default_params();
        params.sense_layer = params.drive_layer;
        expect_config_error(&params, "different layers");

        let mut params = default_params();
        params.sense_layer = layer::T_PLACE;
        expect_config_error(&params, "not a copper layer");
    }

    #[test]
    fn test_rejects_array_larger_than_board() {
        let mut params = default_params();
        params.words = 80;
        expect_config_error(&params, "array with its pads needs");
    }

    #[test]
    fn test_display_uses_unit() {
        let params = default_params();
        assert_eq!(params.display(1.27), "50.000 mil");
    }
}
