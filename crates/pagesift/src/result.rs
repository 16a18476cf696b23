// ABOUTME: ExtractionRecord and its entry types, the aggregate output of one scrape.
// ABOUTME: Includes the JSON shape of each section and the Summary of per-section counts.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Page metadata: the title, the meta description and every other named
/// meta tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub meta_description: String,
    /// Other `<meta>` name (or property) to content pairs. The first
    /// occurrence of a name wins.
    pub other: BTreeMap<String, String>,
}

impl Metadata {
    /// Insert a meta tag unless the name was already seen. The name
    /// `description` is reserved for [`Metadata::meta_description`] and is
    /// never inserted.
    pub fn insert_other(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        if name == "description" {
            return;
        }
        self.other.entry(name).or_insert_with(|| content.into());
    }
}

// Other meta tags are flattened under a `meta_` prefix. `insert_other`
// refuses `description`, so no key repeats.
impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.other.len()))?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("meta_description", &self.meta_description)?;
        for (name, content) in &self.other {
            map.serialize_entry(&format!("meta_{}", name), content)?;
        }
        map.end()
    }
}

/// Headings keyed by level token (`"h1"` .. `"h6"`). Levels with no
/// headings are absent.
pub type Headings = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub text: String,
    pub url: String,
    pub relative_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub alt: String,
    pub src: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub table_index: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Item sequences of every unordered and ordered list, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lists {
    pub ul: Vec<Vec<String>>,
    pub ol: Vec<Vec<String>>,
}

impl Lists {
    /// Total number of lists of both kinds.
    pub fn len(&self) -> usize {
        self.ul.len() + self.ol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Pre,
    Code,
}

impl CodeKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("pre") {
            Some(CodeKind::Pre)
        } else if tag.eq_ignore_ascii_case("code") {
            Some(CodeKind::Code)
        } else {
            None
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CodeKind::Pre => "pre",
            CodeKind::Code => "code",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: CodeKind,
    pub content: String,
}

/// Everything extracted from one page. Field order is the JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    pub url: String,
    pub metadata: Metadata,
    pub headings: Headings,
    pub paragraphs: Vec<String>,
    pub links: Vec<LinkEntry>,
    pub images: Vec<ImageEntry>,
    pub tables: Vec<TableEntry>,
    pub lists: Lists,
    pub code_blocks: Vec<CodeEntry>,
    pub full_text: String,
}

impl ExtractionRecord {
    /// Per-section counts for reporting.
    pub fn summary(&self) -> Summary {
        Summary {
            url: self.url.clone(),
            title: self.metadata.title.clone(),
            description: self.metadata.meta_description.clone(),
            headings: self.headings.values().map(Vec::len).sum(),
            paragraphs: self.paragraphs.len(),
            links: self.links.len(),
            images: self.images.len(),
            tables: self.tables.len(),
            code_blocks: self.code_blocks.len(),
            lists: self.lists.len(),
            text_chars: self.full_text.chars().count(),
        }
    }
}

/// Counts of what a scrape found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: usize,
    pub paragraphs: usize,
    pub links: usize,
    pub images: usize,
    pub tables: usize,
    pub code_blocks: usize,
    pub lists: usize,
    pub text_chars: usize,
}

fn or_na(s: &str) -> &str {
    if s.is_empty() {
        "N/A"
    } else {
        s
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "SCRAPING SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Title: {}", or_na(&self.title))?;
        writeln!(f, "Description: {}", or_na(&self.description))?;
        writeln!(f)?;
        writeln!(f, "Headings found: {}", self.headings)?;
        writeln!(f, "Paragraphs found: {}", self.paragraphs)?;
        writeln!(f, "Links found: {}", self.links)?;
        writeln!(f, "Images found: {}", self.images)?;
        writeln!(f, "Tables found: {}", self.tables)?;
        writeln!(f, "Code blocks found: {}", self.code_blocks)?;
        writeln!(f, "Lists found: {}", self.lists)?;
        writeln!(f, "Total text content: {} characters", self.text_chars)?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_record_has_every_key() {
        let value = serde_json::to_value(ExtractionRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "",
                "metadata": { "title": "", "meta_description": "" },
                "headings": {},
                "paragraphs": [],
                "links": [],
                "images": [],
                "tables": [],
                "lists": { "ul": [], "ol": [] },
                "code_blocks": [],
                "full_text": ""
            })
        );
    }

    #[test]
    fn test_top_level_key_order() {
        let out = serde_json::to_string(&ExtractionRecord::default()).unwrap();
        let keys = [
            "\"url\"",
            "\"metadata\"",
            "\"headings\"",
            "\"paragraphs\"",
            "\"links\"",
            "\"images\"",
            "\"tables\"",
            "\"lists\"",
            "\"code_blocks\"",
            "\"full_text\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| out.find(k).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_metadata_flattens_other_tags_with_prefix() {
        let mut meta = Metadata {
            title: "Home".to_string(),
            meta_description: "About us".to_string(),
            ..Default::default()
        };
        meta.insert_other("og:title", "Open Graph");
        meta.insert_other("title", "clash");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Home",
                "meta_description": "About us",
                "meta_og:title": "Open Graph",
                "meta_title": "clash"
            })
        );
    }

    #[test]
    fn test_insert_other_first_wins() {
        let mut meta = Metadata::default();
        meta.insert_other("author", "first");
        meta.insert_other("author", "second");
        assert_eq!(meta.other.get("author").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_insert_other_refuses_description() {
        let mut meta = Metadata {
            meta_description: "real".to_string(),
            ..Default::default()
        };
        meta.insert_other("description", "shadow");
        assert!(meta.other.is_empty());
        assert_eq!(serde_json::to_value(&meta).unwrap()["meta_description"], "real");
    }

    #[test]
    fn test_code_entry_serializes_type_key() {
        let entry = CodeEntry {
            index: 3,
            kind: CodeKind::Pre,
            content: "fn main() {}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "index": 3, "type": "pre", "content": "fn main() {}" })
        );
    }

    #[test]
    fn test_code_kind_from_tag() {
        assert_eq!(CodeKind::from_tag("PRE"), Some(CodeKind::Pre));
        assert_eq!(CodeKind::from_tag("code"), Some(CodeKind::Code));
        assert_eq!(CodeKind::from_tag("p"), None);
    }

    #[test]
    fn test_summary_counts() {
        let mut record = ExtractionRecord {
            url: "https://example.com".to_string(),
            paragraphs: vec!["a".to_string(), "b".to_string()],
            full_text: "héllo".to_string(),
            ..Default::default()
        };
        record
            .headings
            .insert("h1".to_string(), vec!["One".to_string()]);
        record
            .headings
            .insert("h2".to_string(), vec!["Two".to_string(), "Three".to_string()]);
        record.lists.ul.push(vec!["x".to_string()]);
        record.lists.ol.push(vec!["y".to_string()]);

        let summary = record.summary();
        assert_eq!(summary.headings, 3);
        assert_eq!(summary.paragraphs, 2);
        assert_eq!(summary.lists, 2);
        assert_eq!(summary.text_chars, 5);
    }

    #[test]
    fn test_summary_display_marks_missing_title() {
        let summary = ExtractionRecord::default().summary();
        let text = summary.to_string();
        assert!(text.contains("SCRAPING SUMMARY"));
        assert!(text.contains("Title: N/A"));
        assert!(text.contains("Total text content: 0 characters"));
    }
}
