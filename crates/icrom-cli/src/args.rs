//! Command-line argument definitions for the icrom CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every board setting can also come from the configuration
//! file; a flag given here overrides the file.

use clap::Parser;

use icrom::{config::AppConfig, units::LengthUnit};

/// Generate an Eagle board for an inductively-coupled ROM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of words (drive lines)
    #[arg(short, long)]
    pub words: Option<usize>,

    /// Number of bits per word (sense lines)
    #[arg(short, long)]
    pub bits: Option<usize>,

    /// Bytes per word in the input; packed bit stream when unset
    #[arg(long)]
    pub stride: Option<usize>,

    /// Default unit for lengths given without one (inch, inches, in, mil, mils, mm, cm, m)
    #[arg(short, long)]
    pub unit: Option<LengthUnit>,

    /// Board width
    #[arg(long)]
    pub width: Option<String>,

    /// Board length
    #[arg(long)]
    pub length: Option<String>,

    /// Copper layer for the word lines
    #[arg(long)]
    pub drive_layer: Option<u8>,

    /// Word line trace width
    #[arg(long)]
    pub drive_trace: Option<String>,

    /// Minimum space next to a word line jog
    #[arg(long)]
    pub drive_space: Option<String>,

    /// Distance between word lines
    #[arg(long)]
    pub drive_pitch: Option<String>,

    /// Depth of the word line jogs
    #[arg(long)]
    pub coupling_length: Option<String>,

    /// Copper layer for the bit lines
    #[arg(long)]
    pub sense_layer: Option<u8>,

    /// Bit line trace width
    #[arg(long)]
    pub sense_trace: Option<String>,

    /// Distance between bit line columns
    #[arg(long)]
    pub sense_pitch: Option<String>,

    /// Drill diameter of the line pads
    #[arg(long)]
    pub pad_drill: Option<String>,

    /// Leave out the word and bit labels
    #[arg(long)]
    pub no_labels: bool,

    /// Title text placed in the board corner
    #[arg(long)]
    pub title: Option<String>,

    /// ROM data file; `-` or absent reads standard input
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output board file; `-` or absent writes standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Copies every flag that was given into `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(unit) = self.unit {
            config.set_unit(unit);
        }

        let array = config.array_mut();
        if let Some(words) = self.words {
            array.set_words(words);
        }
        if let Some(bits) = self.bits {
            array.set_bits(bits);
        }
        if self.stride.is_some() {
            array.set_stride(self.stride);
        }

        let board = config.board_mut();
        if let Some(width) = &self.width {
            board.set_width(width.as_str());
        }
        if let Some(length) = &self.length {
            board.set_length(length.as_str());
        }

        let drive = config.drive_mut();
        if let Some(layer) = self.drive_layer {
            drive.set_layer(layer);
        }
        if let Some(trace) = &self.drive_trace {
            drive.set_trace(trace.as_str());
        }
        if let Some(space) = &self.drive_space {
            drive.set_space(space.as_str());
        }
        if let Some(pitch) = &self.drive_pitch {
            drive.set_pitch(pitch.as_str());
        }
        if let Some(coupling) = &self.coupling_length {
            drive.set_coupling(coupling.as_str());
        }

        let sense = config.sense_mut();
        if let Some(layer) = self.sense_layer {
            sense.set_layer(layer);
        }
        if let Some(trace) = &self.sense_trace {
            sense.set_trace(trace.as_str());
        }
        if let Some(pitch) = &self.sense_pitch {
            sense.set_pitch(pitch.as_str());
        }

        if let Some(drill) = &self.pad_drill {
            config.pads_mut().set_drill(drill.as_str());
        }

        if self.no_labels {
            config.labels_mut().set_enabled(false);
        }
        if self.title.is_some() {
            config.labels_mut().set_title(self.title.clone());
        }
    }
}
