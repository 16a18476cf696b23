// ABOUTME: Text-bearing sections: headings, paragraphs, lists, code blocks and the full page text.
// ABOUTME: Each rule is an independent walk over the document in source order.

use crate::dom::Node;
use crate::result::{CodeEntry, CodeKind, Headings, Lists};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements whose text never counts as visible page text.
const INVISIBLE_TAGS: &[&str] = &["script", "style"];

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trimmed_text<'a, N: Node<'a>>(node: &N) -> String {
    node.text().trim().to_string()
}

/// Heading texts per level. Levels without headings are left out.
pub fn extract_headings<'a, N: Node<'a>>(root: N) -> Headings {
    let mut headings = Headings::new();
    for el in root.find_all(&HEADING_TAGS) {
        let level = el.tag_name().to_ascii_lowercase();
        headings.entry(level).or_default().push(trimmed_text(&el));
    }
    headings
}

/// Non-empty paragraph texts.
pub fn extract_paragraphs<'a, N: Node<'a>>(root: N) -> Vec<String> {
    root.find_all(&["p"])
        .iter()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Direct `<li>` texts of every `<ul>` and `<ol>`. A list without direct
/// items is skipped.
pub fn extract_lists<'a, N: Node<'a>>(root: N) -> Lists {
    let mut lists = Lists::default();
    for list in root.find_all(&["ul", "ol"]) {
        let items: Vec<String> = list
            .child_elements()
            .iter()
            .filter(|child| child.is_any(&["li"]))
            .map(trimmed_text)
            .collect();
        if items.is_empty() {
            continue;
        }
        if list.is_any(&["ul"]) {
            lists.ul.push(items);
        } else {
            lists.ol.push(items);
        }
    }
    lists
}

/// Every `<pre>` and `<code>` element, numbered with one shared counter.
pub fn extract_code_blocks<'a, N: Node<'a>>(root: N) -> Vec<CodeEntry> {
    root.find_all(&["pre", "code"])
        .iter()
        .filter_map(|el| CodeKind::from_tag(el.tag_name()).map(|kind| (kind, trimmed_text(el))))
        .enumerate()
        .map(|(index, (kind, content))| CodeEntry {
            index,
            kind,
            content,
        })
        .collect()
}

/// All visible text with `<script>`/`<style>` content removed and whitespace
/// collapsed.
pub fn extract_text_content<'a, N: Node<'a>>(root: N) -> String {
    collapse_whitespace(&root.text_excluding(INVISIBLE_TAGS))
}
