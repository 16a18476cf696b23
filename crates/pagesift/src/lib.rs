// ABOUTME: Main library entry point for pagesift, a single-page structured data extractor.
// ABOUTME: Re-exports the public API: Extractor, ExtractorBuilder, ExtractionRecord, ScrapeError, Options.

//! pagesift - fetch one static HTML page and extract structured data.
//!
//! The extracted [`ExtractionRecord`] holds the page metadata, headings,
//! paragraphs, links, images, tables, lists, code blocks and full text.
//!
//! # Example
//!
//! ```no_run
//! use pagesift::{Extractor, ScrapeError};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let mut extractor = Extractor::new("https://example.com/");
//!     let record = extractor.scrape_all()?;
//!     println!("{}", record.summary());
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod options;
pub mod output;
pub mod resource;
pub mod result;

pub use crate::dom::{Node, ParsedDocument};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractor::Extractor;
pub use crate::extractors::extract_record;
pub use crate::options::{ExtractorBuilder, Options};
pub use crate::output::{default_output_path, save_to_json, to_json};
pub use crate::resource::{FetchResult, Fetcher, HttpFetcher};
pub use crate::result::{
    CodeEntry, CodeKind, ExtractionRecord, ImageEntry, LinkEntry, Lists, Metadata, Summary,
    TableEntry,
};
