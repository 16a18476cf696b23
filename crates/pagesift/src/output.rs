// ABOUTME: JSON output for extraction records: serialization and writing to disk.
// ABOUTME: Derives the default <host>_scraped_data.json file name from the page URL.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ScrapeError;
use crate::result::ExtractionRecord;

/// Suffix of the default output file name.
pub const DEFAULT_FILE_SUFFIX: &str = "_scraped_data.json";

/// Default output path for a page: `<host>_scraped_data.json` in the
/// current directory. Pages without a host use `page` instead.
pub fn default_output_path(page_url: &str) -> PathBuf {
    let host = url::Url::parse(page_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "page".to_string());
    // IPv6 hosts come back bracketed with colons
    let host: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    PathBuf::from(format!("{}{}", host, DEFAULT_FILE_SUFFIX))
}

/// Serialize a record as UTF-8 JSON. Non-ASCII text is written as is.
pub fn to_json(record: &ExtractionRecord, pretty: bool) -> Result<String, ScrapeError> {
    let out = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };
    out.map_err(|e| ScrapeError::write(&record.url, "Serialize", Some(anyhow::Error::new(e))))
}

/// Write a record to `path`, or to [`default_output_path`] when `None`.
/// Returns the path written.
pub fn save_to_json(
    record: &ExtractionRecord,
    path: Option<&Path>,
    pretty: bool,
) -> Result<PathBuf, ScrapeError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&record.url));
    let json = to_json(record, pretty)?;
    fs::write(&path, json).map_err(|e| {
        ScrapeError::write(
            &record.url,
            "Save",
            Some(anyhow::anyhow!("cannot write {}: {}", path.display(), e)),
        )
    })?;
    info!(path = %path.display(), "saved record");
    Ok(path)
}
