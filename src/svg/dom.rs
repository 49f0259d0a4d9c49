//! Owned SVG element tree.
//!
//! Markup is parsed once with quick-xml into [`Element`]s, rewritten by the
//! normalization passes, and serialized back with [`Element::to_markup`] /
//! [`Element::inner_markup`]. Attribute values are kept exactly as they
//! appear in the source (entities stay escaped), so a parse/serialize cycle
//! does not alter text the passes never touch.
//!
//! Comments, processing instructions and doctypes are dropped. Text nodes
//! consisting only of whitespace are dropped as well.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::SvgError;

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Raw (still escaped) character data.
    Text(String),
    CData(String),
}

/// A single XML element with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Names of the elements enclosing the one currently being visited,
/// outermost first.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a>(&'a [String]);

impl Scope<'_> {
    /// Whether any enclosing element has the given local name.
    pub fn within(&self, name: &str) -> bool {
        self.0.iter().any(|n| local(n) == name)
    }

    pub fn within_any(&self, names: &[&str]) -> bool {
        self.0.iter().any(|n| names.contains(&local(n)))
    }

    /// Number of enclosing elements with the given local name.
    #[cfg(test)]
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|n| local(n) == name).count()
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, l)| l)
}

// ============================================================================
// Element access
// ============================================================================

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Element name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    pub fn is(&self, name: &str) -> bool {
        self.local_name() == name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == key)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((key.to_owned(), value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Direct element children.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements().rev().collect(),
        }
    }

    /// First element named `name`, searching `self` first.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.is(name) {
            return Some(self);
        }
        self.descendants().find(|el| el.is(name))
    }

    /// Visit every descendant in document order together with its scope.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Element, Scope<'_>),
    {
        let mut path = vec![self.name.clone()];
        walk_children(self, f, &mut path);
    }

    /// Rebuild the tree, passing each descendant through `f` before its
    /// own children. Returning `None` drops the element and its subtree.
    pub fn filter_map<F>(mut self, f: &mut F) -> Self
    where
        F: FnMut(Element, Scope<'_>) -> Option<Element>,
    {
        let mut path = vec![self.name.clone()];
        self.children = rebuild_children(std::mem::take(&mut self.children), f, &mut path);
        self
    }

    /// Rebuild the tree, passing each descendant through `f`.
    pub fn map<F>(self, f: &mut F) -> Self
    where
        F: FnMut(Element, Scope<'_>) -> Element,
    {
        self.filter_map(&mut |el, scope| Some(f(el, scope)))
    }

    /// Drop every descendant element named `name`.
    pub fn without(self, name: &str) -> Self {
        self.filter_map(&mut |el, _| (!el.is(name)).then_some(el))
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.elements().rev());
        Some(el)
    }
}

fn walk_children<'a, F>(el: &'a Element, f: &mut F, path: &mut Vec<String>)
where
    F: FnMut(&'a Element, Scope<'_>),
{
    for child in el.elements() {
        f(child, Scope(path));
        path.push(child.name.clone());
        walk_children(child, f, path);
        path.pop();
    }
}

fn rebuild_children<F>(children: Vec<Node>, f: &mut F, path: &mut Vec<String>) -> Vec<Node>
where
    F: FnMut(Element, Scope<'_>) -> Option<Element>,
{
    let mut rebuilt = Vec::with_capacity(children.len());
    for node in children {
        match node {
            Node::Element(el) => {
                let Some(mut el) = f(el, Scope(path)) else {
                    continue;
                };
                path.push(el.name.clone());
                el.children = rebuild_children(std::mem::take(&mut el.children), f, path);
                path.pop();
                rebuilt.push(Node::Element(el));
            }
            other => rebuilt.push(other),
        }
    }
    rebuilt
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse markup and return the first top-level element.
pub fn parse(markup: &str) -> Result<Element, SvgError> {
    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(start_element(&e)?),
            Ok(Event::Empty(e)) => {
                let el = start_element(&e)?;
                attach(&mut stack, &mut root, el);
            }
            Ok(Event::End(_)) => {
                let position = reader.buffer_position() as u64;
                let mut el = stack.pop().ok_or(SvgError::UnbalancedTag(position))?;
                el.children
                    .retain(|node| !matches!(node, Node::Text(t) if t.trim().is_empty()));
                attach(&mut stack, &mut root, el);
            }
            Ok(Event::Text(t)) => push_text(&mut stack, &String::from_utf8_lossy(&t)),
            Ok(Event::GeneralRef(r)) => {
                push_text(&mut stack, &format!("&{};", String::from_utf8_lossy(&r)));
            }
            Ok(Event::CData(t)) => {
                if let Some(parent) = stack.last_mut() {
                    let data = String::from_utf8_lossy(&t).into_owned();
                    parent.children.push(Node::CData(data));
                }
            }
            Ok(Event::Eof) => break,
            // declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(source) => {
                return Err(SvgError::Parse {
                    position: reader.error_position() as u64,
                    source,
                });
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(SvgError::UnexpectedEof(open.name));
    }
    root.ok_or(SvgError::MissingRoot)
}

/// Parse markup and return its first `<svg>` element.
pub fn parse_svg(markup: &str) -> Result<Element, SvgError> {
    let root = parse(markup)?;
    if root.is("svg") {
        return Ok(root);
    }
    root.find("svg").cloned().ok_or(SvgError::MissingRoot)
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, SvgError> {
    let mut el = Element::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None => {
            root.get_or_insert(el);
        }
    }
}

/// Append text to the open element, merging with a preceding text node so
/// entity references split by the reader end up in one run.
fn push_text(stack: &mut [Element], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(text),
        _ => parent.children.push(Node::Text(text.to_owned())),
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Element {
    /// Serialize the element itself.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialize the element's children only.
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(child, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => out.push_str(text),
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_tree() {
        let root = parse(r#"<svg viewBox="0 0 24 24"><g><path d="M0 0"/></g></svg>"#).unwrap();
        assert_eq!(root.name, "svg");
        assert_eq!(root.attr("viewBox"), Some("0 0 24 24"));
        let g = root.elements().next().unwrap();
        assert!(g.is("g"));
        assert_eq!(g.elements().next().unwrap().attr("d"), Some("M0 0"));
    }

    #[test]
    fn test_parse_drops_comments_and_whitespace() {
        let markup = "<?xml version=\"1.0\"?>\n<!-- c -->\n<svg>\n  <path d=\"M1 1\"/>\n</svg>";
        let root = parse(markup).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.to_markup(), r#"<svg><path d="M1 1"/></svg>"#);
    }

    #[test]
    fn test_parse_keeps_text_and_entities() {
        let root = parse("<svg><title>a &amp; b</title></svg>").unwrap();
        assert_eq!(root.inner_markup(), "<title>a &amp; b</title>");
    }

    #[test]
    fn test_parse_svg_nested() {
        let svg = parse_svg(r#"<div><svg id="x"/></div>"#).unwrap();
        assert_eq!(svg.attr("id"), Some("x"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("<svg><g></svg>"), Err(SvgError::Parse { .. })));
        assert!(matches!(parse("<svg><g>"), Err(SvgError::UnexpectedEof(_))));
        assert!(matches!(parse_svg("<div/>"), Err(SvgError::MissingRoot)));
        assert!(matches!(parse(""), Err(SvgError::MissingRoot)));
    }

    #[test]
    fn test_single_quoted_value_reserialized() {
        let root = parse(r#"<svg font-family='say "hi"'/>"#).unwrap();
        assert_eq!(root.to_markup(), r#"<svg font-family="say &quot;hi&quot;"/>"#);
    }

    #[test]
    fn test_attr_mutation() {
        let mut el = Element::new("path").with_attr("fill", "red");
        el.set_attr("fill", "blue");
        el.set_attr("stroke", "none");
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.remove_attr("fill").as_deref(), Some("blue"));
        assert!(!el.has_attr("fill"));
    }

    #[test]
    fn test_descendants_document_order() {
        let root = parse("<svg><g><a/><b/></g><c/></svg>").unwrap();
        let names: Vec<_> = root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["g", "a", "b", "c"]);
    }

    #[test]
    fn test_filter_map_with_scope() {
        let root = parse("<svg><mask><rect/></mask><rect/></svg>").unwrap();
        let root = root.filter_map(&mut |el, scope| {
            (!(el.is("rect") && scope.within("mask"))).then_some(el)
        });
        assert_eq!(root.to_markup(), "<svg><mask/><rect/></svg>");
    }

    #[test]
    fn test_walk_scope_counts() {
        let root = parse("<svg><g><g><path/></g></g></svg>").unwrap();
        let mut depths = Vec::new();
        root.walk(&mut |el, scope| depths.push((el.name.clone(), scope.count("g"))));
        assert_eq!(depths[2], ("path".to_string(), 2));
    }

    #[test]
    fn test_without() {
        let root = parse("<svg><style>.a{}</style><path/></svg>").unwrap();
        assert_eq!(root.without("style").to_markup(), "<svg><path/></svg>");
    }
}
