//! CLI logic for the icrom board generator.
//!
//! Reads ROM data, lays out the board and writes the Eagle file. Both ends
//! default to the standard streams so the tool can sit in a pipeline; logs
//! go to standard error.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs::{self, File},
    io::{self, Write},
};

use log::info;

use icrom::{BoardBuilder, IcromError, data::RomData};

/// Run the icrom CLI application
///
/// The whole board is rendered before anything is written, so a failing run
/// leaves no partial output behind.
///
/// # Errors
///
/// Returns `IcromError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed lengths
/// - Input data that does not match the array size
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), IcromError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    args.apply(&mut app_config);
    let builder = BoardBuilder::new(app_config);

    let data = read_data(&builder, stream_path(args.input.as_deref()))?;

    let mut xml = Vec::new();
    let summary = builder.write_to(&data, &mut xml)?;

    match stream_path(args.output.as_deref()) {
        Some(path) => fs::write(path, &xml)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&xml)?;
            stdout.flush()?;
        }
    }

    info!(
        output_path = args.output.as_deref().unwrap_or("-"),
        nets = summary.nets(),
        wires = summary.wires(),
        vias = summary.vias();
        "Board exported successfully"
    );

    Ok(())
}

fn read_data(builder: &BoardBuilder, input: Option<&str>) -> Result<RomData, IcromError> {
    match input {
        Some(path) => {
            info!(input_path = path; "Reading ROM data");
            builder.load_data(File::open(path)?)
        }
        None => {
            info!("Reading ROM data from standard input");
            builder.load_data(io::stdin().lock())
        }
    }
}

/// `None` for the standard stream, written as `-` or left out.
fn stream_path(path: Option<&str>) -> Option<&str> {
    path.filter(|path| *path != "-")
}
