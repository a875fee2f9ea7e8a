//! The generic XML node every Eagle item serializes into.

/// An XML element with ordered attributes, child elements and optional text.
///
/// Eagle items are plain structs; each implements [`ToElement`] to produce
/// one of these when the document is written.
///
/// # Example
///
/// ```
/// # use icrom_core::eagle::Element;
/// let layer = Element::new("layer")
///     .with_attr("number", "1")
///     .with_attr("name", "Top");
///
/// assert_eq!(layer.name(), "layer");
/// assert_eq!(layer.attr("name"), Some("Top"));
/// assert!(layer.children().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Adds an attribute and returns the element.
    pub fn with_attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.push_attr(key, value);
        self
    }

    /// Adds an attribute in place.
    pub fn push_attr(&mut self, key: &'static str, value: impl Into<String>) {
        self.attributes.push((key, value.into()));
    }

    /// Adds a child element and returns the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a child element in place.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Appends every element produced by the iterator as a child.
    pub fn extend_children(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children.extend(children);
    }

    /// Sets the text content and returns the element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns the tag name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the attributes in insertion order.
    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    /// Returns the value of the named attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the child elements.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Collects every descendant (including `self`) with the given name,
    /// in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }
}

/// Conversion of a typed Eagle item into its XML element.
pub trait ToElement {
    /// Builds the element for this item.
    fn to_element(&self) -> Element;
}

impl ToElement for Element {
    fn to_element(&self) -> Element {
        self.clone()
    }
}

impl<T: ToElement> ToElement for &T {
    fn to_element(&self) -> Element {
        (**self).to_element()
    }
}

/// Formats a coordinate or dimension the way Eagle files carry them: fixed
/// six decimals, in millimetres.
pub fn format_mm(value: f64) -> String {
    // Avoid "-0.000000" for values that round to zero.
    let value = if value.abs() < 5e-7 { 0.0 } else { value };
    format!("{value:.6}")
}

/// Formats a boolean as Eagle's `yes`/`no`.
pub fn format_bool(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
