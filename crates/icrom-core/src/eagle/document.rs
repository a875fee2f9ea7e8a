//! Whole Eagle files: settings, grid, layer table and one drawing.

use crate::eagle::{
    board::Board,
    element::{Element, ToElement},
    layer::Layers,
    library::Library,
};

/// The file format version written into every document.
pub const VERSION: &str = "6.5.0";

/// A single `<setting>` entry, written as `<setting name="value"/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    name: &'static str,
    value: String,
}

impl Setting {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl ToElement for Setting {
    fn to_element(&self) -> Element {
        Element::new("setting").with_attr(self.name, self.value.clone())
    }
}

/// The `<settings>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<Setting>,
}

impl Settings {
    /// Appends a setting.
    pub fn push(&mut self, setting: Setting) {
        self.entries.push(setting);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entries: vec![
                Setting::new("alwaysvectorfont", "no"),
                Setting::new("verticaltext", "up"),
            ],
        }
    }
}

impl ToElement for Settings {
    fn to_element(&self) -> Element {
        let mut element = Element::new("settings");
        element.extend_children(self.entries.iter().map(Setting::to_element));
        element
    }
}

/// Editor grid. Eagle stores it with the file; the values are the stock
/// 0.1 inch grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grid;

impl ToElement for Grid {
    fn to_element(&self) -> Element {
        Element::new("grid")
            .with_attr("distance", "0.1")
            .with_attr("unitdist", "inch")
            .with_attr("unit", "inch")
            .with_attr("style", "lines")
            .with_attr("multiple", "1")
            .with_attr("display", "no")
            .with_attr("altdistance", "0.01")
            .with_attr("altunitdist", "inch")
            .with_attr("altunit", "inch")
    }
}

/// An Eagle file wrapping one drawing (`Board` or `Library`).
///
/// # Example
///
/// ```
/// # use icrom_core::eagle::{Board, BoardFile, ToElement};
/// let file = BoardFile::new(Board::new());
/// let root = file.to_element();
///
/// assert_eq!(root.name(), "eagle");
/// assert_eq!(root.attr("version"), Some("6.5.0"));
/// let drawing = root.child("drawing").unwrap();
/// let sections: Vec<_> = drawing.children().iter().map(|e| e.name()).collect();
/// assert_eq!(sections, ["settings", "grid", "layers", "board"]);
/// ```
#[derive(Debug, Clone)]
pub struct EagleFile<D> {
    settings: Settings,
    grid: Grid,
    layers: Layers,
    drawing: D,
}

/// A board file (`.brd`).
pub type BoardFile = EagleFile<Board>;

/// A library file (`.lbr`).
pub type LibraryFile = EagleFile<Library>;

impl<D: ToElement> EagleFile<D> {
    /// Wraps a drawing with the default settings and the standard layers.
    pub fn new(drawing: D) -> Self {
        Self {
            settings: Settings::default(),
            grid: Grid,
            layers: Layers::standard(),
            drawing,
        }
    }

    /// Returns the drawing.
    pub fn drawing(&self) -> &D {
        &self.drawing
    }

    /// Returns the drawing for modification.
    pub fn drawing_mut(&mut self) -> &mut D {
        &mut self.drawing
    }

    /// Returns the layer table.
    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// Returns the settings block for modification.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consumes the file and returns the drawing.
    pub fn into_drawing(self) -> D {
        self.drawing
    }
}

impl<D: ToElement> ToElement for EagleFile<D> {
    fn to_element(&self) -> Element {
        let drawing = Element::new("drawing")
            .with_child(self.settings.to_element())
            .with_child(self.grid.to_element())
            .with_child(self.layers.to_element())
            .with_child(self.drawing.to_element());
        Element::new("eagle")
            .with_attr("version", VERSION)
            .with_child(drawing)
    }
}
