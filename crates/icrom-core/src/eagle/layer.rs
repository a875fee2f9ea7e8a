//! Eagle layer definitions.
//!
//! Every Eagle drawing declares its layer table up front. The table written
//! here is the stock Eagle 6 table: sixteen copper layers, the mechanical and
//! documentation layers, and the schematic layers (91 to 98).

use indexmap::IndexMap;

use crate::eagle::element::{Element, ToElement, format_bool};

/// Top copper.
pub const TOP: u8 = 1;
/// Bottom copper.
pub const BOTTOM: u8 = 16;
/// Board outline.
pub const DIMENSION: u8 = 20;
/// Top silkscreen.
pub const T_PLACE: u8 = 21;
/// Bottom silkscreen.
pub const B_PLACE: u8 = 22;
/// Top component names.
pub const T_NAMES: u8 = 25;
/// Top documentation.
pub const T_DOCU: u8 = 51;

/// A single entry of the layer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    number: u8,
    name: &'static str,
    color: u8,
    fill: u8,
    visible: bool,
    active: bool,
}

impl Layer {
    /// Creates a layer definition.
    pub fn new(
        number: u8,
        name: &'static str,
        color: u8,
        fill: u8,
        visible: bool,
        active: bool,
    ) -> Self {
        Self {
            number,
            name,
            color,
            fill,
            visible,
            active,
        }
    }

    /// Returns the layer number.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the layer name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` for the sixteen copper layers.
    pub fn is_copper(&self) -> bool {
        (TOP..=BOTTOM).contains(&self.number)
    }

    /// Returns whether the layer is shown by default.
    pub fn visible(&self) -> bool {
        self.visible
    }
}

impl ToElement for Layer {
    fn to_element(&self) -> Element {
        Element::new("layer")
            .with_attr("number", self.number.to_string())
            .with_attr("name", self.name)
            .with_attr("color", self.color.to_string())
            .with_attr("fill", self.fill.to_string())
            .with_attr("visible", format_bool(self.visible))
            .with_attr("active", format_bool(self.active))
    }
}

/// (number, name, color, fill, visible)
const STANDARD_LAYERS: [(u8, &str, u8, u8, bool); 59] = [
    (1, "Top", 4, 1, true),
    (2, "Route2", 1, 3, false),
    (3, "Route3", 4, 3, false),
    (4, "Route4", 1, 4, false),
    (5, "Route5", 4, 4, false),
    (6, "Route6", 1, 8, false),
    (7, "Route7", 4, 8, false),
    (8, "Route8", 1, 2, false),
    (9, "Route9", 4, 2, false),
    (10, "Route10", 1, 7, false),
    (11, "Route11", 4, 7, false),
    (12, "Route12", 1, 5, false),
    (13, "Route13", 4, 5, false),
    (14, "Route14", 1, 6, false),
    (15, "Route15", 4, 6, false),
    (16, "Bottom", 1, 1, true),
    (17, "Pads", 2, 1, true),
    (18, "Vias", 2, 1, true),
    (19, "Unrouted", 6, 1, true),
    (20, "Dimension", 15, 1, true),
    (21, "tPlace", 7, 1, true),
    (22, "bPlace", 7, 1, true),
    (23, "tOrigins", 15, 1, true),
    (24, "bOrigins", 15, 1, true),
    (25, "tNames", 7, 1, true),
    (26, "bNames", 7, 1, true),
    (27, "tValues", 7, 1, true),
    (28, "bValues", 7, 1, true),
    (29, "tStop", 7, 3, false),
    (30, "bStop", 7, 6, false),
    (31, "tCream", 7, 4, false),
    (32, "bCream", 7, 5, false),
    (33, "tFinish", 6, 3, false),
    (34, "bFinish", 6, 6, false),
    (35, "tGlue", 7, 4, false),
    (36, "bGlue", 7, 5, false),
    (37, "tTest", 7, 1, false),
    (38, "bTest", 7, 1, false),
    (39, "tKeepout", 4, 11, true),
    (40, "bKeepout", 1, 11, true),
    (41, "tRestrict", 4, 10, true),
    (42, "bRestrict", 1, 10, true),
    (43, "vRestrict", 2, 10, true),
    (44, "Drills", 7, 1, false),
    (45, "Holes", 7, 1, false),
    (46, "Milling", 3, 1, false),
    (47, "Measures", 7, 1, false),
    (48, "Document", 7, 1, true),
    (49, "Reference", 7, 1, true),
    (51, "tDocu", 7, 1, true),
    (52, "bDocu", 7, 1, true),
    (91, "Nets", 2, 1, true),
    (92, "Busses", 1, 1, true),
    (93, "Pins", 2, 1, false),
    (94, "Symbols", 4, 1, true),
    (95, "Names", 7, 1, true),
    (96, "Values", 7, 1, true),
    (97, "Info", 7, 1, true),
    (98, "Guide", 6, 1, true),
];

/// The layer table of a drawing, ordered by insertion and keyed by number.
#[derive(Debug, Clone)]
pub struct Layers {
    by_number: IndexMap<u8, Layer>,
}

impl Layers {
    /// Returns the stock Eagle layer table. All layers are active.
    ///
    /// # Example
    ///
    /// ```
    /// # use icrom_core::eagle::{Layers, layer};
    /// let layers = Layers::standard();
    /// assert_eq!(layers.len(), 59);
    /// assert_eq!(layers.get(layer::BOTTOM).map(|l| l.name()), Some("Bottom"));
    /// assert_eq!(layers.by_name("tPlace").map(|l| l.number()), Some(layer::T_PLACE));
    /// ```
    pub fn standard() -> Self {
        let by_number = STANDARD_LAYERS
            .iter()
            .map(|&(number, name, color, fill, visible)| {
                (number, Layer::new(number, name, color, fill, visible, true))
            })
            .collect();
        Self { by_number }
    }

    /// Looks a layer up by number.
    pub fn get(&self, number: u8) -> Option<&Layer> {
        self.by_number.get(&number)
    }

    /// Looks a layer up by name.
    pub fn by_name(&self, name: &str) -> Option<&Layer> {
        self.by_number.values().find(|layer| layer.name == name)
    }

    /// Returns `true` if the table defines the layer number.
    pub fn contains(&self, number: u8) -> bool {
        self.by_number.contains_key(&number)
    }

    /// Returns the number of layers.
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    /// Iterates the layers in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.by_number.values()
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::standard()
    }
}

impl ToElement for Layers {
    fn to_element(&self) -> Element {
        let mut element = Element::new("layers");
        element.extend_children(self.iter().map(Layer::to_element));
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_ordered() {
        let numbers: Vec<_> = Layers::standard().iter().map(Layer::number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
        assert!(!numbers.contains(&50));
    }

    #[test]
    fn test_copper_layers() {
        let layers = Layers::standard();
        let copper = layers.iter().filter(|l| l.is_copper()).count();
        assert_eq!(copper, 16);
        assert!(!layers.get(DIMENSION).unwrap().is_copper());
    }

    #[test]
    fn test_named_constants_match_table() {
        let layers = Layers::standard();
        for (number, name) in [
            (TOP, "Top"),
            (BOTTOM, "Bottom"),
            (DIMENSION, "Dimension"),
            (T_PLACE, "tPlace"),
            (B_PLACE, "bPlace"),
            (T_NAMES, "tNames"),
            (T_DOCU, "tDocu"),
        ] {
            assert_eq!(layers.get(number).map(Layer::name), Some(name));
        }
    }

    #[test]
    fn test_layer_element() {
        let element = Layers::standard().get(TOP).unwrap().to_element();
        assert_eq!(element.attr("number"), Some("1"));
        assert_eq!(element.attr("name"), Some("Top"));
        assert_eq!(element.attr("color"), Some("4"));
        assert_eq!(element.attr("visible"), Some("yes"));
        assert_eq!(element.attr("active"), Some("yes"));

        let hidden = Layers::standard().get(2).unwrap().to_element();
        assert_eq!(hidden.attr("visible"), Some("no"));
    }
}
