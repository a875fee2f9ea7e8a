//! The board drawing: free-standing primitives and routed signals.

use crate::{
    eagle::{
        element::{Element, ToElement},
        layer,
        library::Library,
        primitive::{Rectangle, Text, Via, Wire},
    },
    geometry::Point,
};

/// Primitives that belong to no signal: outline, silkscreen, documentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plain {
    wires: Vec<Wire>,
    rectangles: Vec<Rectangle>,
    texts: Vec<Text>,
}

impl Plain {
    pub fn add_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    pub fn add_rectangle(&mut self, rectangle: Rectangle) {
        self.rectangles.push(rectangle);
    }

    pub fn add_text(&mut self, text: Text) {
        self.texts.push(text);
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn texts(&self) -> &[Text] {
        &self.texts
    }
}

impl ToElement for Plain {
    fn to_element(&self) -> Element {
        let mut element = Element::new("plain");
        element.extend_children(self.wires.iter().map(Wire::to_element));
        element.extend_children(self.rectangles.iter().map(Rectangle::to_element));
        element.extend_children(self.texts.iter().map(Text::to_element));
        element
    }
}

/// A named net with its copper.
///
/// # Example
///
/// ```
/// # use icrom_core::{eagle::{Signal, ToElement, Via, Wire, layer}, geometry::Point};
/// let mut signal = Signal::new("word000");
/// signal.add_wire(Wire::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.254, layer::TOP));
/// signal.add_via(Via::new(Point::new(0.0, 0.0), 1.0668));
///
/// let element = signal.to_element();
/// assert_eq!(element.attr("name"), Some("word000"));
/// assert_eq!(element.children().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    name: String,
    wires: Vec<Wire>,
    vias: Vec<Via>,
}

impl Signal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wires: Vec::new(),
            vias: Vec::new(),
        }
    }

    pub fn add_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    pub fn add_via(&mut self, via: Via) {
        self.vias.push(via);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn vias(&self) -> &[Via] {
        &self.vias
    }
}

impl ToElement for Signal {
    fn to_element(&self) -> Element {
        let mut element = Element::new("signal").with_attr("name", self.name.clone());
        element.extend_children(self.wires.iter().map(Wire::to_element));
        element.extend_children(self.vias.iter().map(Via::to_element));
        element
    }
}

/// A board drawing.
///
/// Only the plain section, libraries and signals carry content; the other
/// sections Eagle expects are written empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    plain: Plain,
    libraries: Vec<Library>,
    signals: Vec<Signal>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(&self) -> &Plain {
        &self.plain
    }

    pub fn plain_mut(&mut self) -> &mut Plain {
        &mut self.plain
    }

    pub fn add_library(&mut self, library: Library) {
        self.libraries.push(library);
    }

    pub fn add_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Draws a rectangular board outline as four zero-width wires on the
    /// Dimension layer, running `p1 -> (p1.x, p2.y) -> p2 -> (p2.x, p1.y) -> p1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use icrom_core::{eagle::{Board, layer}, geometry::Point};
    /// let mut board = Board::new();
    /// board.add_rectangular_outline(Point::new(0.0, 0.0), Point::new(99.06, 99.06));
    ///
    /// let wires = board.plain().wires();
    /// assert_eq!(wires.len(), 4);
    /// assert!(wires.iter().all(|w| w.layer() == layer::DIMENSION && w.width() == 0.0));
    /// assert_eq!(wires[3].p2(), Point::new(0.0, 0.0));
    /// ```
    pub fn add_rectangular_outline(&mut self, p1: Point, p2: Point) {
        let corners = [
            p1,
            Point::new(p1.x(), p2.y()),
            p2,
            Point::new(p2.x(), p1.y()),
            p1,
        ];
        for pair in corners.windows(2) {
            self.plain
                .add_wire(Wire::new(pair[0], pair[1], 0.0, layer::DIMENSION));
        }
    }
}

impl ToElement for Board {
    fn to_element(&self) -> Element {
        let mut libraries = Element::new("libraries");
        libraries.extend_children(self.libraries.iter().map(Library::to_element));
        let mut signals = Element::new("signals");
        signals.extend_children(self.signals.iter().map(Signal::to_element));

        Element::new("board")
            .with_child(self.plain.to_element())
            .with_child(libraries)
            .with_child(Element::new("attributes"))
            .with_child(Element::new("variantdefs"))
            .with_child(Element::new("classes"))
            .with_child(Element::new("designrules"))
            .with_child(Element::new("autorouter"))
            .with_child(Element::new("elements"))
            .with_child(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_section_order() {
        let element = Board::new().to_element();
        let names: Vec<_> = element.children().iter().map(Element::name).collect();
        assert_eq!(
            names,
            [
                "plain",
                "libraries",
                "attributes",
                "variantdefs",
                "classes",
                "designrules",
                "autorouter",
                "elements",
                "signals",
            ]
        );
    }

    #[test]
    fn test_outline_is_closed() {
        let mut board = Board::new();
        board.add_rectangular_outline(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let wires = board.plain().wires();
        for pair in wires.windows(2) {
            assert_eq!(pair[0].p2(), pair[1].p1());
        }
        assert_eq!(wires[0].p1(), wires[3].p2());
        assert_eq!(wires[1].p2(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_signal_wires_precede_vias() {
        let mut signal = Signal::new("bit000");
        signal.add_via(Via::new(Point::new(0.0, 0.0), 1.0));
        signal.add_wire(Wire::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            0.254,
            layer::BOTTOM,
        ));
        let element = signal.to_element();
        let names: Vec<_> = element.children().iter().map(Element::name).collect();
        assert_eq!(names, ["wire", "via"]);
    }

    #[test]
    fn test_plain_groups_primitives_by_kind() {
        let mut plain = Plain::default();
        plain.add_text(Text::new(Point::new(0.0, 0.0), 1.0, layer::T_PLACE, "W0"));
        plain.add_rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            layer::T_DOCU,
        ));
        plain.add_wire(Wire::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            0.0,
            layer::DIMENSION,
        ));
        let element = plain.to_element();
        let names: Vec<_> = element.children().iter().map(Element::name).collect();
        assert_eq!(names, ["wire", "rectangle", "text"]);
    }

    #[test]
    fn test_board_signals_serialized() {
        let mut board = Board::new();
        board.add_signal(Signal::new("word000"));
        board.add_signal(Signal::new("bit000"));
        board.add_library(Library::named("icrom"));
        let element = board.to_element();
        assert_eq!(element.find_all("signal").len(), 2);
        assert_eq!(element.find_all("library").len(), 1);
        assert_eq!(board.signals()[1].name(), "bit000");
    }
}
