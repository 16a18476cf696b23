// ABOUTME: DOM layer for pagesift: the Node trait and the owned ParsedDocument tree.
// ABOUTME: Extraction rules see only the Node trait, never scraper's internal types.

//! DOM types for parsed pages.
//!
//! [`ParsedDocument`] is built once per fetch from scraper's html5ever output
//! and owns all of its data. Both it and [`scraper::ElementRef`] implement
//! [`Node`], the interface every extraction rule is written against.

pub mod document;
pub mod node;

pub use document::{Child, DocElement, Element, ParsedDocument};
pub use node::{ChildNode, Node};
