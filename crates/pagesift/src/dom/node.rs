// ABOUTME: The Node trait every extraction rule is written against, plus its scraper binding.
// ABOUTME: Exposes tag name, attributes, ordered children and derived text/descendant walks.

use scraper::ElementRef;

/// A child of an element: either another element or a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildNode<'a, N> {
    Element(N),
    Text(&'a str),
}

/// A read-only view of one element in a parsed document.
///
/// Only the four required methods touch a concrete parser; traversal and
/// text collection are derived from them, so extraction rules behave the
/// same over any implementation.
pub trait Node<'a>: Copy + 'a {
    /// Lowercase tag name, e.g. `"a"` or `"h2"`.
    fn tag_name(&self) -> &'a str;

    /// Value of the named attribute, if present.
    fn attr(&self, name: &str) -> Option<&'a str>;

    /// All attributes in source order.
    fn attributes(&self) -> Vec<(&'a str, &'a str)>;

    /// Ordered element and text children. Comments and other node kinds are
    /// not included.
    fn child_nodes(&self) -> Vec<ChildNode<'a, Self>>;

    /// Element children only, in order.
    fn child_elements(&self) -> Vec<Self> {
        self.child_nodes()
            .into_iter()
            .filter_map(|child| match child {
                ChildNode::Element(el) => Some(el),
                ChildNode::Text(_) => None,
            })
            .collect()
    }

    /// Returns true if the tag name matches one of `tags`.
    fn is_any(&self, tags: &[&str]) -> bool {
        let name = self.tag_name();
        tags.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Concatenated text of every descendant text node, in document order.
    fn text(&self) -> String {
        self.text_excluding(&[])
    }

    /// Like [`Node::text`], but skips the subtrees of elements named in `skip`.
    fn text_excluding(&self, skip: &[&str]) -> String {
        let mut out = String::new();
        let mut stack: Vec<ChildNode<'a, Self>> = vec![ChildNode::Element(*self)];
        while let Some(node) = stack.pop() {
            match node {
                ChildNode::Text(t) => out.push_str(t),
                ChildNode::Element(el) => {
                    if el.is_any(skip) {
                        continue;
                    }
                    stack.extend(el.child_nodes().into_iter().rev());
                }
            }
        }
        out
    }

    /// All descendant elements in document (pre-)order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.child_elements().into_iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.child_elements().into_iter().rev());
        }
        out
    }

    /// Descendant elements whose tag is one of `tags`, in document order.
    fn find_all(&self, tags: &[&str]) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|el| el.is_any(tags))
            .collect()
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn attributes(&self) -> Vec<(&'a str, &'a str)> {
        self.value().attrs().collect()
    }

    fn child_nodes(&self) -> Vec<ChildNode<'a, Self>> {
        let node: ego_tree::NodeRef<'a, scraper::Node> = **self;
        node.children()
            .filter_map(|child| match child.value() {
                scraper::Node::Text(text) => Some(ChildNode::Text(&**text)),
                scraper::Node::Element(_) => ElementRef::wrap(child).map(ChildNode::Element),
                _ => None,
            })
            .collect()
    }
}
