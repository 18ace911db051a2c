//! In-memory element tree the highlighter scans and rewrites.
//!
//! This is the crate's stand-in for the browser DOM: a container holds
//! "line" elements (one per visual terminal row), each line holds an
//! arbitrary mix of text nodes and nested styling elements. The rewriter
//! splits text nodes and splices anchor elements in place; the flattened
//! text content of a line is invariant under that rewrite.

/// Marker class carried by every line element.
pub const LINE_CLASS: &str = "terminal-line";

/// Marker class carried by every anchor the highlighter creates.
pub const LINK_CLASS: &str = "terminal-link";

/// A single node in the tree: either raw text or an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Convenience constructor for a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }
}

/// An element: a tag, an ordered attribute list, and child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build an element carrying a single `class` attribute.
    pub fn with_class(tag: impl Into<String>, class: impl Into<String>) -> Self {
        let mut el = Element::new(tag);
        el.set_attr("class", class);
        el
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Whether the space-separated `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|part| part == class_name))
    }

    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::text(content));
    }

    /// Flattened text content: all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Serialize to an HTML-like string with escaped text and attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// The scanning root: a container whose descendants carrying the line
/// marker class are the lines the highlighter processes, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub root: Element,
}

impl Container {
    pub fn new(root: Element) -> Self {
        Container { root }
    }

    /// Build a container from plain text: one line element per input line,
    /// using the default marker classes.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lines_with_class(lines, LINE_CLASS)
    }

    /// Like [`Container::from_lines`], with an explicit line marker class.
    pub fn from_lines_with_class<I, S>(lines: I, line_class: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Element::new("div");
        for line in lines {
            let mut el = Element::with_class("div", line_class);
            el.push_text(line.as_ref());
            root.push_child(Node::Element(el));
        }
        Container { root }
    }

    /// All line elements in document order (matches descend into matches,
    /// like `querySelectorAll`).
    pub fn lines(&self, line_class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_lines(&self.root, line_class, &mut out);
        out
    }

    /// Flattened text of every line, in document order.
    pub fn line_texts(&self, line_class: &str) -> Vec<String> {
        self.lines(line_class).iter().map(|l| l.text_content()).collect()
    }

    /// Mutable access to the `index`-th line element in document order.
    pub fn line_mut(&mut self, line_class: &str, index: usize) -> Option<&mut Element> {
        let mut remaining = index;
        find_line_mut(&mut self.root, line_class, &mut remaining)
    }

    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}

fn collect_lines<'a>(el: &'a Element, class: &str, out: &mut Vec<&'a Element>) {
    for child in &el.children {
        if let Node::Element(e) = child {
            if e.has_class(class) {
                out.push(e);
            }
            collect_lines(e, class, out);
        }
    }
}

fn find_line_mut<'a>(el: &'a mut Element, class: &str, remaining: &mut usize) -> Option<&'a mut Element> {
    for child in el.children.iter_mut() {
        let Node::Element(e) = child else { continue };
        if e.has_class(class) {
            if *remaining == 0 {
                return Some(e);
            }
            *remaining -= 1;
        }
        if let Some(found) = find_line_mut(e, class, remaining) {
            return Some(found);
        }
    }
    None
}
