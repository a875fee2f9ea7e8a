//! Eagle CAD document model.
//!
//! Items are plain structs that know how to turn themselves into a generic
//! [`Element`] tree through [`ToElement`]; [`write_document`] serializes that
//! tree as Eagle XML.
//!
//! # Overview
//!
//! - [`document`]: file wrapper ([`EagleFile`], [`BoardFile`], [`LibraryFile`]),
//!   settings and grid
//! - [`layer`]: the layer table and the layer numbers the generator uses
//! - [`board`]: [`Board`], [`Plain`], [`Signal`]
//! - [`library`]: [`Library`], [`Package`], [`Deviceset`], [`Device`]
//! - [`primitive`]: [`Wire`], [`Via`], [`Rectangle`], [`Text`], [`Pad`]
//! - [`writer`]: XML output
//!
//! # Example
//!
//! ```
//! # use icrom_core::{eagle::{Board, BoardFile, Signal, Wire, layer, to_xml_string}, geometry::Point};
//! let mut board = Board::new();
//! board.add_rectangular_outline(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
//!
//! let mut signal = Signal::new("word000");
//! signal.add_wire(Wire::new(Point::new(5.0, 5.0), Point::new(45.0, 5.0), 0.254, layer::TOP));
//! board.add_signal(signal);
//!
//! let xml = to_xml_string(&BoardFile::new(board)).unwrap();
//! assert!(xml.contains("<signal name=\"word000\">"));
//! ```

pub mod board;
pub mod document;
pub mod element;
pub mod layer;
pub mod library;
pub mod primitive;
pub mod writer;

pub use board::{Board, Plain, Signal};
pub use document::{BoardFile, EagleFile, Grid, LibraryFile, Setting, Settings, VERSION};
pub use element::{Element, ToElement};
pub use layer::{Layer, Layers};
pub use library::{Device, Deviceset, Library, Package, Technology};
pub use primitive::{Align, Pad, Primitive, Rectangle, Shape, Text, Via, Wire};
pub use writer::{WriteError, to_xml_string, write_document};
