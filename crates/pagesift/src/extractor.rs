// ABOUTME: The Extractor, which fetches one page and runs every extraction rule over it.
// ABOUTME: Tracks the unfetched/fetched state and rejects extraction before a successful fetch.

use tracing::debug;
use url::Url;

use crate::dom::ParsedDocument;
use crate::error::ScrapeError;
use crate::extractors;
use crate::options::ExtractorBuilder;
use crate::resource::{FetchResult, Fetcher, HttpFetcher};
use crate::result::{
    CodeEntry, ExtractionRecord, Headings, ImageEntry, LinkEntry, Lists, Metadata, TableEntry,
};

/// A page held after a successful fetch.
#[derive(Debug, Clone)]
struct Fetched {
    base: Url,
    document: ParsedDocument,
}

/// Extracts structured data from a single page.
///
/// An Extractor starts unfetched. [`Extractor::fetch`] (or
/// [`Extractor::scrape_all`]) loads the page; after that every `extract_*`
/// operation reads the same immutable document and always returns the same
/// result. Calling an `extract_*` operation before a successful fetch fails
/// with a State error.
#[derive(Debug, Clone)]
pub struct Extractor<F = HttpFetcher> {
    url: String,
    fetcher: F,
    page: Option<Fetched>,
}

impl Extractor<HttpFetcher> {
    /// Create an unfetched Extractor using the default HTTP fetcher.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_fetcher(url, HttpFetcher::default())
    }

    /// Create a new ExtractorBuilder for configuring the fetcher.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Create an Extractor that is already fetched, from markup in hand.
    /// `url` is still the base for link resolution.
    pub fn from_html(url: impl Into<String>, html: &str) -> Result<Self, ScrapeError> {
        let mut extractor = Self::new(url);
        let page = FetchResult::from_html(extractor.url.clone(), html);
        extractor.load(page)?;
        Ok(extractor)
    }
}

impl<F: Fetcher> Extractor<F> {
    /// Create an unfetched Extractor that loads pages through `fetcher`.
    pub fn with_fetcher(url: impl Into<String>, fetcher: F) -> Self {
        Self {
            url: url.into(),
            fetcher,
            page: None,
        }
    }

    /// The page URL this Extractor was created with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true once a fetch has succeeded.
    pub fn is_fetched(&self) -> bool {
        self.page.is_some()
    }

    /// Fetch and parse the page, replacing any previously held document.
    ///
    /// On failure the Extractor keeps whatever it held before.
    pub fn fetch(&mut self) -> Result<(), ScrapeError> {
        let page = self.fetcher.fetch(&self.url)?;
        self.load(page)
    }

    fn load(&mut self, page: FetchResult) -> Result<(), ScrapeError> {
        let base = Url::parse(&self.url).map_err(|e| {
            ScrapeError::invalid_url(
                &self.url,
                "Fetch",
                Some(anyhow::anyhow!("invalid URL: {}", e)),
            )
        })?;
        let html = page.text()?;
        let document = ParsedDocument::parse(&html);
        debug!(url = %self.url, bytes = html.len(), "parsed page");
        self.page = Some(Fetched { base, document });
        Ok(())
    }

    fn fetched(&self, op: &str) -> Result<&Fetched, ScrapeError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScrapeError::state(&self.url, op))
    }

    pub fn extract_metadata(&self) -> Result<Metadata, ScrapeError> {
        let page = self.fetched("ExtractMetadata")?;
        Ok(extractors::extract_metadata(page.document.root()))
    }

    pub fn extract_headings(&self) -> Result<Headings, ScrapeError> {
        let page = self.fetched("ExtractHeadings")?;
        Ok(extractors::extract_headings(page.document.root()))
    }

    pub fn extract_paragraphs(&self) -> Result<Vec<String>, ScrapeError> {
        let page = self.fetched("ExtractParagraphs")?;
        Ok(extractors::extract_paragraphs(page.document.root()))
    }

    /// Links with hrefs resolved against the page URL.
    pub fn extract_links(&self) -> Result<Vec<LinkEntry>, ScrapeError> {
        let page = self.fetched("ExtractLinks")?;
        Ok(extractors::extract_links(page.document.root(), &page.base))
    }

    pub fn extract_images(&self) -> Result<Vec<ImageEntry>, ScrapeError> {
        let page = self.fetched("ExtractImages")?;
        Ok(extractors::extract_images(page.document.root()))
    }

    pub fn extract_tables(&self) -> Result<Vec<TableEntry>, ScrapeError> {
        let page = self.fetched("ExtractTables")?;
        Ok(extractors::extract_tables(page.document.root()))
    }

    pub fn extract_lists(&self) -> Result<Lists, ScrapeError> {
        let page = self.fetched("ExtractLists")?;
        Ok(extractors::extract_lists(page.document.root()))
    }

    pub fn extract_code_blocks(&self) -> Result<Vec<CodeEntry>, ScrapeError> {
        let page = self.fetched("ExtractCodeBlocks")?;
        Ok(extractors::extract_code_blocks(page.document.root()))
    }

    /// Visible page text with scripts and styles removed and whitespace
    /// collapsed.
    pub fn extract_text_content(&self) -> Result<String, ScrapeError> {
        let page = self.fetched("ExtractTextContent")?;
        Ok(extractors::extract_text_content(page.document.root()))
    }

    /// Run every extraction over the held document without fetching.
    pub fn extract_all(&self) -> Result<ExtractionRecord, ScrapeError> {
        let page = self.fetched("ExtractAll")?;
        let record = ExtractionRecord {
            url: self.url.clone(),
            ..extractors::extract_record(page.document.root(), &page.base)
        };
        debug!(
            url = %self.url,
            links = record.links.len(),
            tables = record.tables.len(),
            paragraphs = record.paragraphs.len(),
            "extracted record"
        );
        Ok(record)
    }

    /// Fetch the page, then extract every section into one record.
    pub fn scrape_all(&mut self) -> Result<ExtractionRecord, ScrapeError> {
        self.fetch()?;
        self.extract_all()
    }
}
