// ABOUTME: Extraction rules module aggregating the per-section extractors.
// ABOUTME: Exports metadata, text, links and tables submodules plus extract_record.

pub mod links;
pub mod metadata;
pub mod tables;
pub mod text;

use url::Url;

use crate::dom::Node;
use crate::result::ExtractionRecord;

pub use links::{extract_images, extract_links, resolve_url};
pub use metadata::extract_metadata;
pub use tables::extract_tables;
pub use text::{
    collapse_whitespace, extract_code_blocks, extract_headings, extract_lists,
    extract_paragraphs, extract_text_content,
};

/// Run every extraction rule over `root` and assemble the record.
pub fn extract_record<'a, N: Node<'a>>(root: N, base: &Url) -> ExtractionRecord {
    ExtractionRecord {
        url: base.to_string(),
        metadata: extract_metadata(root),
        headings: extract_headings(root),
        paragraphs: extract_paragraphs(root),
        links: extract_links(root, base),
        images: extract_images(root),
        tables: extract_tables(root),
        lists: extract_lists(root),
        code_blocks: extract_code_blocks(root),
        full_text: extract_text_content(root),
    }
}
