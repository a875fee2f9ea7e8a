//! Serialization of generated boards.

use std::io::Write;

use log::{debug, info};

use icrom_core::eagle::{BoardFile, write_document};

use crate::error::IcromError;

/// A destination for finished boards.
pub(crate) trait Exporter {
    fn export_board(&mut self, file: &BoardFile) -> Result<(), IcromError>;
}

/// Writes boards as Eagle XML to any [`Write`] sink.
pub(crate) struct XmlExporter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> XmlExporter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for XmlExporter<W> {
    fn export_board(&mut self, file: &BoardFile) -> Result<(), IcromError> {
        debug!(signals = file.drawing().signals().len(); "Writing board XML");
        write_document(file, &mut self.writer)?;
        self.writer.flush()?;
        self.written += 1;
        info!(boards = self.written; "Board exported");
        Ok(())
    }
}

/// Renders `file` to an XML string.
pub(crate) fn render(file: &BoardFile) -> Result<String, IcromError> {
    let mut exporter = XmlExporter::new(Vec::new());
    exporter.export_board(file)?;
    let bytes = exporter.into_inner();
    String::from_utf8(bytes).map_err(|err| IcromError::Export(err.into()))
}
