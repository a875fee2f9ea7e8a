//! XML serialization of an [`Element`] tree.
//!
//! Output is indented by two spaces with one element per line. Eagle refuses
//! files with very long lines, so nothing is ever written on a single line.

use std::{io, string::FromUtf8Error};

use log::debug;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use thiserror::Error;

use crate::eagle::element::{Element, ToElement};

/// Errors raised while writing a document.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Writes the XML declaration followed by the element tree of `item`.
///
/// # Example
///
/// ```
/// # use icrom_core::eagle::{Element, write_document};
/// let mut out = Vec::new();
/// write_document(&Element::new("eagle").with_attr("version", "6.5.0"), &mut out).unwrap();
///
/// let xml = String::from_utf8(out).unwrap();
/// assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
/// assert!(xml.contains("<eagle version=\"6.5.0\"/>"));
/// ```
pub fn write_document<T, W>(item: &T, writer: W) -> Result<(), WriteError>
where
    T: ToElement + ?Sized,
    W: io::Write,
{
    let root = item.to_element();
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut count = 0usize;
    write_element(&mut xml, &root, &mut count)?;
    io::Write::write_all(xml.get_mut(), b"\n")?;

    debug!(root = root.name(), elements = count; "Document written");
    Ok(())
}

/// Serializes `item` into an in-memory string.
pub fn to_xml_string<T: ToElement + ?Sized>(item: &T) -> Result<String, WriteError> {
    let mut buffer = Vec::new();
    write_document(item, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_element<W: io::Write>(
    xml: &mut Writer<W>,
    element: &Element,
    count: &mut usize,
) -> Result<(), WriteError> {
    *count += 1;

    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((*key, value.as_str()));
    }

    if element.children().is_empty() && element.text().is_none() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml.write_event(Event::Start(start))?;
    if let Some(text) = element.text() {
        xml.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(xml, child, count)?;
    }
    xml.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eagle::{Board, BoardFile, Signal, Text, Wire, layer},
        geometry::Point,
    };

    #[test]
    fn test_nested_elements_are_indented() {
        let tree = Element::new("signals").with_child(
            Element::new("signal")
                .with_attr("name", "word000")
                .with_child(Element::new("wire").with_attr("layer", "1")),
        );
        let xml = to_xml_string(&tree).unwrap();
        let lines: Vec<_> = xml.lines().collect();
        assert_eq!(
            lines,
            [
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
                "<signals>",
                "  <signal name=\"word000\">",
                "    <wire layer=\"1\"/>",
                "  </signal>",
                "</signals>",
            ]
        );
    }

    #[test]
    fn test_text_is_escaped_and_inline() {
        let text = Text::new(Point::new(0.0, 0.0), 1.0, layer::T_PLACE, "R&D <rom>");
        let xml = to_xml_string(&text).unwrap();
        assert!(xml.contains(">R&amp;D &lt;rom&gt;</text>"), "{xml}");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let xml = to_xml_string(&Signal::new("a\"b")).unwrap();
        assert!(xml.contains("name=\"a&quot;b\""), "{xml}");
    }

    #[test]
    fn test_board_file_parses_back() {
        let mut board = Board::new();
        board.add_rectangular_outline(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let mut signal = Signal::new("bit000");
        signal.add_wire(Wire::new(
            Point::new(1.0, 1.0),
            Point::new(1.0, 5.0),
            0.254,
            layer::BOTTOM,
        ));
        board.add_signal(signal);

        let xml = to_xml_string(&BoardFile::new(board)).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "eagle");
        assert_eq!(root.attribute("version"), Some("6.5.0"));

        let wires: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("wire"))
            .collect();
        assert_eq!(wires.len(), 5);
        let signal = doc
            .descendants()
            .find(|n| n.has_tag_name("signal"))
            .unwrap();
        assert_eq!(signal.attribute("name"), Some("bit000"));
    }

    #[test]
    fn test_no_line_is_excessively_long() {
        let xml = to_xml_string(&BoardFile::new(Board::new())).unwrap();
        assert!(xml.lines().all(|line| line.len() < 200));
    }
}
