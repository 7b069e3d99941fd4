//! Lenient HTML/SVG parsing.
//!
//! quick-xml does the tokenizing; the tree is built here with a handful of
//! HTML allowances: void elements, valueless attributes, and end tags that do
//! not line up with what is open.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::ast::*;
use crate::error::FloorflipError;

/// HTML elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parse an HTML page or SVG file into a Document.
pub fn parse_markup(text: &str) -> Result<Document, FloorflipError> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut tree = TreeBuilder::default();

    loop {
        let start_pos = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(start) => {
                let mut element = parse_element_start(&start)?;
                element.raw_start = Some(format!("<{}>", as_str(&start)?));
                if is_void(&element.name.local) {
                    element.close = Close::Omitted;
                    tree.push(Node::Element(element));
                } else {
                    tree.open(element);
                }
            }
            Event::Empty(start) => {
                let mut element = parse_element_start(&start)?;
                element.raw_start = Some(format!("<{}/>", as_str(&start)?));
                element.close = Close::SelfClosing;
                tree.push(Node::Element(element));
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                tree.close(&name);
            }
            Event::Text(text) => {
                tree.push(Node::Text(as_str(&text)?.to_string()));
            }
            Event::Comment(comment) => {
                tree.push(Node::Comment(as_str(&comment)?.to_string()));
            }
            Event::CData(cdata) => {
                tree.push(Node::CData(as_str(&cdata)?.to_string()));
            }
            Event::DocType(doctype) => {
                let end_pos = reader.buffer_position() as usize;
                let raw = match text.get(start_pos..end_pos) {
                    Some(raw) => raw.to_string(),
                    None => format!("<!DOCTYPE{}>", as_str(&doctype)?),
                };
                tree.push(Node::DocType(raw));
            }
            Event::Decl(decl) => {
                tree.push(Node::ProcessingInstruction(as_str(&decl)?.to_string()));
            }
            Event::PI(pi) => {
                tree.push(Node::ProcessingInstruction(as_str(&pi)?.to_string()));
            }
            Event::Eof => break,
        }
    }

    Ok(tree.finish())
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn as_str(bytes: &[u8]) -> Result<&str, FloorflipError> {
    Ok(std::str::from_utf8(bytes)?)
}

fn parse_element_start(start: &BytesStart) -> Result<Element, FloorflipError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element::new(name);

    for attr in start.html_attributes() {
        let attr =
            attr.map_err(|e| FloorflipError::InvalidMarkup(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            value: value.to_string(),
        });
    }

    Ok(element)
}

/// Stack of open elements plus the finished top-level nodes.
#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    top: Vec<Node>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.top.push(node),
        }
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    /// Close the nearest open element called `name`, implicitly closing
    /// everything opened after it.
    fn close(&mut self, name: &str) {
        let Some(idx) = self
            .open
            .iter()
            .rposition(|e| e.name.full_name().eq_ignore_ascii_case(name))
        else {
            debug!(tag = name, "dropping end tag with no open element");
            return;
        };

        while self.open.len() > idx + 1 {
            self.close_top(Close::Omitted);
        }
        self.close_top(Close::Tag(name.to_string()));
    }

    fn close_top(&mut self, close: Close) {
        if let Some(mut element) = self.open.pop() {
            element.close = close;
            self.push(Node::Element(element));
        }
    }

    fn finish(mut self) -> Document {
        while !self.open.is_empty() {
            self.close_top(Close::Omitted);
        }
        Document { children: self.top }
    }
}
