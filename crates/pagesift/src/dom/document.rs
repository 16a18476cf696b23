// ABOUTME: ParsedDocument, the owned and immutable element tree an Extractor holds after a fetch.
// ABOUTME: Built once from scraper's html5ever output; implements the Node trait for extraction.

use std::fmt;

use scraper::Html;

use super::node::{ChildNode, Node};

/// An owned child of an [`Element`]. Element children are indices into the
/// owning [`ParsedDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(usize),
    Text(String),
}

/// One element of a [`ParsedDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Child>,
}

impl Element {
    /// Copy the tag and attributes of `node`, without its children.
    fn shallow<'a, N: Node<'a>>(node: N) -> Self {
        Self {
            tag: node.tag_name().to_ascii_lowercase(),
            attributes: node
                .attributes()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: Vec::new(),
        }
    }
}

/// A parsed HTML page.
///
/// Parsing is lenient: html5ever recovers from any malformed markup, so
/// building a document from text cannot fail. The tree always has an
/// `<html>` root.
///
/// Elements live in one flat vector (the root at index 0), so building,
/// dropping and cloning a document never recurse however deep the markup
/// nests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    elements: Vec<Element>,
}

impl ParsedDocument {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        Self::from_node(doc.root_element())
    }

    /// Copy `root` and its subtree out of any [`Node`] implementation.
    pub fn from_node<'a, N: Node<'a>>(root: N) -> Self {
        let mut elements = vec![Element::shallow(root)];
        let mut stack = vec![(root, 0usize)];

        while let Some((node, id)) = stack.pop() {
            for child in node.child_nodes() {
                let child = match child {
                    ChildNode::Element(el) => {
                        let child_id = elements.len();
                        elements.push(Element::shallow(el));
                        stack.push((el, child_id));
                        Child::Element(child_id)
                    }
                    ChildNode::Text(t) => Child::Text(t.to_string()),
                };
                elements[id].children.push(child);
            }
        }

        Self { elements }
    }

    /// The `<html>` root element.
    pub fn root(&self) -> DocElement<'_> {
        DocElement { doc: self, id: 0 }
    }
}

/// A borrowed handle to one element of a [`ParsedDocument`].
#[derive(Clone, Copy)]
pub struct DocElement<'a> {
    doc: &'a ParsedDocument,
    id: usize,
}

impl<'a> DocElement<'a> {
    /// The element data behind this handle.
    pub fn element(&self) -> &'a Element {
        &self.doc.elements[self.id]
    }
}

impl fmt::Debug for DocElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocElement")
            .field("id", &self.id)
            .field("tag", &self.element().tag)
            .finish()
    }
}

impl<'a> Node<'a> for DocElement<'a> {
    fn tag_name(&self) -> &'a str {
        &self.element().tag
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn attributes(&self) -> Vec<(&'a str, &'a str)> {
        self.element()
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    fn child_nodes(&self) -> Vec<ChildNode<'a, Self>> {
        let doc = self.doc;
        self.element()
            .children
            .iter()
            .map(|child| match child {
                Child::Element(id) => ChildNode::Element(DocElement { doc, id: *id }),
                Child::Text(t) => ChildNode::Text(t.as_str()),
            })
            .collect()
    }
}
