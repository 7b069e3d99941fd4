//! Locating the SVG root inside an HTML page.

use crate::ast::{Document, Element};
use crate::error::FloorflipError;
use crate::parse::parse_markup;
use crate::serialize::{SerializeOptions, render_svg};

/// First `<svg>` in document order. Nested or later sibling roots are never
/// looked at once a match is found.
pub fn find_first_svg(doc: &Document) -> Result<&Element, FloorflipError> {
    doc.descendants()
        .find(|e| e.name.local.eq_ignore_ascii_case("svg"))
        .ok_or(FloorflipError::MissingElement("svg"))
}

/// Parse `html`, pull out its first SVG root and render it as a standalone
/// SVG document.
pub fn extract_svg(html: &str, options: &SerializeOptions) -> Result<String, FloorflipError> {
    let doc = parse_markup(html)?;
    let svg = find_first_svg(&doc)?;
    Ok(render_svg(svg, options))
}
