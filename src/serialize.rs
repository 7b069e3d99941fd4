//! Markup serialization.
//!
//! Two writers live here. [`write_markup`] puts a whole document back
//! together from the source pieces the parser kept, re-rendering only start
//! tags whose attributes changed. [`render_svg`] turns an SVG subtree into a
//! standalone, indented SVG file with XML self-closing rules.

use crate::ast::*;

/// SVG namespace added to a bare root `<svg>` by [`render_svg`].
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Geometry primitives written as `<tag ... />` when they have no children.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "circle",
    "ellipse",
    "line",
    "path",
    "polygon",
    "polyline",
    "rect",
    "use",
    "image",
    "stop",
    "animate",
    "animateMotion",
    "animateTransform",
    "set",
];

/// Containers that always keep an explicit end tag, even when empty.
pub const CONTAINER_TAGS: &[&str] = &["svg", "g", "defs", "style", "text"];

/// Elements whose content is written inline, without indentation or newlines.
pub const TEXT_CONTAINER_TAGS: &[&str] = &["text", "style"];

/// Tag rules for [`render_svg`].
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Self-close these when childless
    pub self_closing: &'static [&'static str],
    /// Never self-close these
    pub containers: &'static [&'static str],
    /// Render the content of these inline
    pub text_containers: &'static [&'static str],
    /// Indentation per nesting level
    pub indent: &'static str,
    /// Add `xmlns` to a root `<svg>` that lacks one
    pub ensure_namespace: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            self_closing: SELF_CLOSING_TAGS,
            containers: CONTAINER_TAGS,
            text_containers: TEXT_CONTAINER_TAGS,
            indent: "    ",
            ensure_namespace: true,
        }
    }
}

impl SerializeOptions {
    fn self_closes(&self, elem: &Element) -> bool {
        let name = elem.name.local.as_str();
        !has_content(elem) && (self.self_closing.contains(&name) || !self.containers.contains(&name))
    }

    fn is_text_container(&self, elem: &Element) -> bool {
        self.text_containers.contains(&elem.name.local.as_str())
    }
}

/// Whitespace between tags does not count as content.
fn has_content(elem: &Element) -> bool {
    elem.children.iter().any(|n| !n.is_blank_text())
}

/// Write a document back out, reusing the source text of everything that
/// was not edited.
pub fn write_markup(doc: &Document) -> String {
    let mut out = String::new();
    for node in &doc.children {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => out.push_str(text),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::CData(data) => push_cdata(out, data),
        Node::DocType(doctype) => out.push_str(doctype),
        Node::ProcessingInstruction(content) => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        }
    }
}

fn write_element(out: &mut String, elem: &Element) {
    match &elem.raw_start {
        Some(raw) => out.push_str(raw),
        None => {
            push_open_tag(out, elem, false);
            if elem.close == Close::SelfClosing {
                out.push_str("/>");
            } else {
                out.push('>');
            }
        }
    }

    for child in &elem.children {
        write_node(out, child);
    }

    if let Close::Tag(name) = &elem.close {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

/// Render an SVG element and its subtree as standalone SVG text.
pub fn render_svg(svg: &Element, options: &SerializeOptions) -> String {
    let mut out = String::new();
    let add_namespace = options.ensure_namespace
        && svg.is("svg")
        && !svg.attributes.iter().any(|a| a.name.is_default_namespace());
    render_element(&mut out, svg, 0, options, add_namespace);
    out
}

fn render_node(out: &mut String, node: &Node, depth: usize, options: &SerializeOptions) {
    match node {
        Node::Element(elem) => render_element(out, elem, depth, options, false),
        Node::Text(text) => {
            // Trimmed onto its own indented line. Content of `text`/`style`
            // is written verbatim by `render_inline` instead.
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                push_indent(out, depth, options);
                out.push_str(trimmed);
                out.push('\n');
            }
        }
        Node::Comment(comment) => {
            push_indent(out, depth, options);
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->\n");
        }
        Node::CData(data) => {
            push_indent(out, depth, options);
            push_cdata(out, data);
            out.push('\n');
        }
        Node::DocType(_) | Node::ProcessingInstruction(_) => {}
    }
}

fn render_element(
    out: &mut String,
    elem: &Element,
    depth: usize,
    options: &SerializeOptions,
    add_namespace: bool,
) {
    push_indent(out, depth, options);
    push_open_tag(out, elem, add_namespace);

    if options.self_closes(elem) {
        out.push_str(" />\n");
        return;
    }

    out.push('>');

    if options.is_text_container(elem) {
        for child in &elem.children {
            render_inline(out, child, options);
        }
    } else {
        out.push('\n');
        for child in &elem.children {
            render_node(out, child, depth + 1, options);
        }
        push_indent(out, depth, options);
    }

    push_close_tag(out, elem);
    out.push('\n');
}

/// Content of `<text>`/`<style>`: exactly what was there, no layout added.
fn render_inline(out: &mut String, node: &Node, options: &SerializeOptions) {
    match node {
        Node::Element(elem) => {
            push_open_tag(out, elem, false);
            if options.self_closes(elem) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in &elem.children {
                render_inline(out, child, options);
            }
            push_close_tag(out, elem);
        }
        Node::Text(text) => out.push_str(text),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::CData(data) => push_cdata(out, data),
        Node::DocType(_) | Node::ProcessingInstruction(_) => {}
    }
}

fn push_open_tag(out: &mut String, elem: &Element, add_namespace: bool) {
    out.push('<');
    out.push_str(&elem.name.full_name());
    if add_namespace {
        out.push_str(" xmlns=\"");
        out.push_str(SVG_NAMESPACE);
        out.push('"');
    }
    for attr in &elem.attributes {
        push_attr(out, attr);
    }
}

fn push_close_tag(out: &mut String, elem: &Element) {
    out.push_str("</");
    out.push_str(&elem.name.full_name());
    out.push('>');
}

/// Values go out as they came in; only the quote character adapts so a value
/// read from single quotes that contains `"` stays well-formed.
fn push_attr(out: &mut String, attr: &Attribute) {
    let quote = if attr.value.contains('"') { '\'' } else { '"' };
    out.push(' ');
    out.push_str(&attr.name.full_name());
    out.push('=');
    out.push(quote);
    out.push_str(&attr.value);
    out.push(quote);
}

fn push_cdata(out: &mut String, data: &str) {
    out.push_str("<![CDATA[");
    out.push_str(data);
    out.push_str("]]>");
}

fn push_indent(out: &mut String, depth: usize, options: &SerializeOptions) {
    for _ in 0..depth {
        out.push_str(options.indent);
    }
}
