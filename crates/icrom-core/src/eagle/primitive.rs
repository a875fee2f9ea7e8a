//! Geometric primitives placed on a board, in a signal or in a package.
//!
//! # Overview
//!
//! - [`Wire`]: a straight trace segment on one layer
//! - [`Via`]: a plated hole connecting copper layers
//! - [`Rectangle`]: a filled rectangle on one layer
//! - [`Text`]: a text label
//! - [`Pad`]: a through-hole pad, only valid inside a library package
//! - [`Primitive`]: any of the above, for containers that mix them
//!
//! All dimensions are millimetres and are written with six decimals.

use std::fmt;

use crate::{
    eagle::element::{Element, ToElement, format_mm},
    geometry::Point,
};

/// A straight trace segment.
///
/// # Example
///
/// ```
/// # use icrom_core::{eagle::{ToElement, Wire, layer}, geometry::Point};
/// let wire = Wire::new(Point::new(0.0, 0.0), Point::new(2.54, 0.0), 0.254, layer::TOP);
/// let element = wire.to_element();
///
/// assert_eq!(element.attr("layer"), Some("1"));
/// assert_eq!(element.attr("width"), Some("0.254000"));
/// assert_eq!(element.attr("x2"), Some("2.540000"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    p1: Point,
    p2: Point,
    width: f64,
    layer: u8,
}

impl Wire {
    /// Creates a wire from `p1` to `p2`.
    pub fn new(p1: Point, p2: Point, width: f64, layer: u8) -> Self {
        Self {
            p1,
            p2,
            width,
            layer,
        }
    }

    /// Returns the start point.
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Returns the end point.
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Returns the trace width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the layer number.
    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// Returns the Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        (self.p2.x() - self.p1.x()).hypot(self.p2.y() - self.p1.y())
    }

    /// Returns `true` if the segment runs parallel to the Y axis.
    pub fn is_vertical(&self) -> bool {
        self.p1.x() == self.p2.x() && self.p1.y() != self.p2.y()
    }

    /// Returns `true` if the segment runs parallel to the X axis.
    pub fn is_horizontal(&self) -> bool {
        self.p1.y() == self.p2.y() && self.p1.x() != self.p2.x()
    }
}

impl ToElement for Wire {
    fn to_element(&self) -> Element {
        Element::new("wire")
            .with_attr("layer", self.layer.to_string())
            .with_attr("width", format_mm(self.width))
            .with_attr("x1", format_mm(self.p1.x()))
            .with_attr("y1", format_mm(self.p1.y()))
            .with_attr("x2", format_mm(self.p2.x()))
            .with_attr("y2", format_mm(self.p2.y()))
    }
}

/// Copper shape of a via or pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Square,
    Round,
    Octagon,
    /// Elongated pad; not valid for vias.
    Long,
    /// Elongated pad offset to one side; not valid for vias.
    Offset,
}

impl Shape {
    /// Returns the Eagle attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Round => "round",
            Self::Octagon => "octagon",
            Self::Long => "long",
            Self::Offset => "offset",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plated through hole.
///
/// Without an explicit diameter Eagle sizes the copper ring from its design
/// rules; without a shape the via is round.
#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    at: Point,
    drill: f64,
    diameter: Option<f64>,
    extent: (u8, u8),
    shape: Option<Shape>,
}

impl Via {
    /// Creates a via through all sixteen copper layers.
    pub fn new(at: Point, drill: f64) -> Self {
        Self {
            at,
            drill,
            diameter: None,
            extent: (1, 16),
            shape: None,
        }
    }

    /// Sets the copper diameter.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    /// Sets the first and last copper layer the via spans.
    pub fn with_extent(mut self, first: u8, last: u8) -> Self {
        self.extent = (first, last);
        self
    }

    /// Sets the copper shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Returns the centre of the via.
    pub fn at(&self) -> Point {
        self.at
    }

    /// Returns the drill diameter.
    pub fn drill(&self) -> f64 {
        self.drill
    }

    /// Returns the copper diameter, if set.
    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    /// Returns the layer span.
    pub fn extent(&self) -> (u8, u8) {
        self.extent
    }
}

impl ToElement for Via {
    fn to_element(&self) -> Element {
        let mut element = Element::new("via")
            .with_attr("x", format_mm(self.at.x()))
            .with_attr("y", format_mm(self.at.y()))
            .with_attr("drill", format_mm(self.drill))
            .with_attr("extent", format!("{}-{}", self.extent.0, self.extent.1));
        if let Some(diameter) = self.diameter {
            element.push_attr("diameter", format_mm(diameter));
        }
        if let Some(shape) = self.shape {
            element.push_attr("shape", shape.as_str());
        }
        element
    }
}

/// A filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    p1: Point,
    p2: Point,
    layer: u8,
}

impl Rectangle {
    /// Creates a rectangle spanning the two corners.
    pub fn new(p1: Point, p2: Point, layer: u8) -> Self {
        Self { p1, p2, layer }
    }

    /// Returns the first corner.
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Returns the second corner.
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Returns the layer number.
    pub fn layer(&self) -> u8 {
        self.layer
    }
}

impl ToElement for Rectangle {
    fn to_element(&self) -> Element {
        Element::new("rectangle")
            .with_attr("layer", self.layer.to_string())
            .with_attr("x1", format_mm(self.p1.x()))
            .with_attr("y1", format_mm(self.p1.y()))
            .with_attr("x2", format_mm(self.p2.x()))
            .with_attr("y2", format_mm(self.p2.y()))
    }
}

/// Anchor point of a text relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
    CenterLeft,
    Center,
    CenterRight,
    TopLeft,
    TopCenter,
    TopRight,
}

impl Align {
    /// Returns the Eagle attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
        }
    }
}

/// A text label.
///
/// # Example
///
/// ```
/// # use icrom_core::{eagle::{Align, Text, ToElement, layer}, geometry::Point};
/// let text = Text::new(Point::new(1.0, 2.0), 0.8128, layer::T_PLACE, "W000")
///     .with_ratio(8)
///     .with_align(Align::CenterRight);
/// let element = text.to_element();
///
/// assert_eq!(element.text(), Some("W000"));
/// assert_eq!(element.attr("align"), Some("center-right"));
/// assert_eq!(element.attr("ratio"), Some("8"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    at: Point,
    size: f64,
    layer: u8,
    value: String,
    ratio: Option<u8>,
    align: Option<Align>,
}

impl Text {
    /// Creates a text label of the given character height.
    pub fn new(at: Point, size: f64, layer: u8, value: impl Into<String>) -> Self {
        Self {
            at,
            size,
            layer,
            value: value.into(),
            ratio: None,
            align: None,
        }
    }

    /// Sets the stroke width as a percentage of the size.
    pub fn with_ratio(mut self, ratio: u8) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Sets the anchor. Bottom-left is Eagle's default and is not written.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Returns the anchor position.
    pub fn at(&self) -> Point {
        self.at
    }

    /// Returns the character height.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Returns the layer number.
    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// Returns the text content.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl ToElement for Text {
    fn to_element(&self) -> Element {
        let mut element = Element::new("text")
            .with_attr("x", format_mm(self.at.x()))
            .with_attr("y", format_mm(self.at.y()))
            .with_attr("size", format_mm(self.size))
            .with_attr("layer", self.layer.to_string());
        if let Some(ratio) = self.ratio {
            element.push_attr("ratio", ratio.to_string());
        }
        if let Some(align) = self.align.filter(|a| *a != Align::BottomLeft) {
            element.push_attr("align", align.as_str());
        }
        element.with_text(self.value.clone())
    }
}

/// A through-hole pad of a package.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    name: String,
    at: Point,
    drill: f64,
    diameter: Option<f64>,
    shape: Option<Shape>,
}

impl Pad {
    /// Creates a round pad with an automatic copper diameter.
    pub fn new(name: impl Into<String>, at: Point, drill: f64) -> Self {
        Self {
            name: name.into(),
            at,
            drill,
            diameter: None,
            shape: None,
        }
    }

    /// Sets the copper diameter.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    /// Sets the copper shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Returns the pad name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pad centre.
    pub fn at(&self) -> Point {
        self.at
    }
}

impl ToElement for Pad {
    fn to_element(&self) -> Element {
        let mut element = Element::new("pad")
            .with_attr("name", self.name.clone())
            .with_attr("x", format_mm(self.at.x()))
            .with_attr("y", format_mm(self.at.y()))
            .with_attr("drill", format_mm(self.drill));
        if let Some(diameter) = self.diameter {
            element.push_attr("diameter", format_mm(diameter));
        }
        if let Some(shape) = self.shape {
            element.push_attr("shape", shape.as_str());
        }
        element
    }
}

/// Any primitive, for containers that hold a mix of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Wire(Wire),
    Via(Via),
    Rectangle(Rectangle),
    Text(Text),
    Pad(Pad),
}

impl ToElement for Primitive {
    fn to_element(&self) -> Element {
        match self {
            Self::Wire(wire) => wire.to_element(),
            Self::Via(via) => via.to_element(),
            Self::Rectangle(rectangle) => rectangle.to_element(),
            Self::Text(text) => text.to_element(),
            Self::Pad(pad) => pad.to_element(),
        }
    }
}

impl From<Wire> for Primitive {
    fn from(wire: Wire) -> Self {
        Self::Wire(wire)
    }
}

impl From<Via> for Primitive {
    fn from(via: Via) -> Self {
        Self::Via(via)
    }
}

impl From<Rectangle> for Primitive {
    fn from(rectangle: Rectangle) -> Self {
        Self::Rectangle(rectangle)
    }
}

impl From<Text> for Primitive {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Pad> for Primitive {
    fn from(pad: Pad) -> Self {
        Self::Pad(pad)
    }
}
