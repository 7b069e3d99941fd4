//! Markup syntax tree
//!
//! The tree keeps enough of the source text around to write untouched markup
//! back out byte for byte: text is stored still escaped, every element keeps
//! the raw start tag it was read from, and how it was closed.

/// A parsed markup document (HTML page or standalone SVG).
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level nodes in source order
    pub children: Vec<Node>,
}

/// An HTML/SVG element.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name with optional prefix (e.g., "svg", "xlink:href")
    pub name: QName,
    /// Attributes on this element, in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes
    pub children: Vec<Node>,
    /// How the element was closed in the source
    pub close: Close,
    /// The start tag exactly as read. Cleared as soon as an attribute changes.
    pub(crate) raw_start: Option<String>,
}

/// How an element ends in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Close {
    /// An explicit end tag; holds the name as written (`</G>` keeps `G`)
    Tag(String),
    /// `<rect/>`
    SelfClosing,
    /// HTML void element, or an element left open until its parent closed
    Omitted,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace prefix (e.g., "xlink")
    pub prefix: Option<String>,
    /// Local name (e.g., "href")
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        if let Some((prefix, local)) = s.split_once(':') {
            Self::with_prefix(prefix, local)
        } else {
            Self::new(s)
        }
    }

    /// True for a bare `xmlns`, the default namespace declaration.
    /// `xmlns:xlink` and friends do not count.
    pub fn is_default_namespace(&self) -> bool {
        self.prefix.is_none() && self.local == "xmlns"
    }

    /// Get the full name as a string.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute on an element. The value is kept exactly as written, entities
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QName::parse(&name.into()),
            value: value.into(),
        }
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element node
    Element(Element),
    /// A text node, still escaped
    Text(String),
    /// A comment node (content between `<!--` and `-->`)
    Comment(String),
    /// A CDATA section
    CData(String),
    /// A `<!DOCTYPE ...>` declaration exactly as written
    DocType(String),
    /// A processing instruction or XML declaration (content between `<?` and `?>`)
    ProcessingInstruction(String),
}

impl Node {
    /// True for text nodes that hold nothing but whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        let name = QName::parse(&name.into());
        let close = Close::Tag(name.full_name());
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            close,
            raw_start: None,
        }
    }

    /// Get an attribute value by local name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name.local == name) {
            if attr.value == value {
                return;
            }
            attr.value = value;
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
        self.raw_start = None;
    }

    /// Check if this element has a specific local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name
    }

    /// Whether the start tag still matches the source text.
    pub fn is_pristine(&self) -> bool {
        self.raw_start.is_some()
    }

    /// Iterate over child elements only (skip text, comments, etc.).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over child elements mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Pre-order walk over this element and every element below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Recursively visit this element and all elements below it mutably.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.child_elements_mut() {
            child.for_each_element_mut(f);
        }
    }
}

impl Document {
    /// Iterate over top-level elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over top-level elements mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Pre-order depth-first walk over every element in the document.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }
}

/// Pre-order depth-first element iterator. Stops as soon as the caller stops
/// pulling, so `find` never visits more of the tree than it has to.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(elem.child_elements());
        self.stack[start..].reverse();
        Some(elem)
    }
}
