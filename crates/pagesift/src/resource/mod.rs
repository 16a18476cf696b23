// ABOUTME: Resource handling module: the Fetcher seam and its blocking HTTP implementation.
// ABOUTME: Handles timeouts, status checks, content-length limits, and charset decoding.

use bytes::Bytes;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::options::Options;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Build a result from markup already in hand, as if served with a 200.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            status: 200,
            final_url: url.clone(),
            url,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Bytes::from(html.into()),
        }
    }

    /// Decode the body to text, using the charset from the content-type
    /// header or, without one, a detected encoding.
    ///
    /// Fails with a Parse error when the bytes are not valid in that
    /// encoding.
    pub fn text(&self) -> Result<String, ScrapeError> {
        decode_body(&self.body, self.content_type.as_deref()).ok_or_else(|| {
            ScrapeError::parse(
                &self.url,
                "Decode",
                Some(anyhow::anyhow!("body is not valid text in its declared or detected encoding")),
            )
        })
    }
}

/// Source of raw pages for an Extractor.
pub trait Fetcher {
    /// Fetch `url`. Any non-success outcome is an error; nothing partial is
    /// returned.
    fn fetch(&self, url: &str) -> Result<FetchResult, ScrapeError>;
}

/// Decode body bytes to a String using the content-type charset or detection.
/// Returns None when decoding hits malformed sequences.
fn decode_body(body: &[u8], content_type: Option<&str>) -> Option<String> {
    let encoding = content_type
        .and_then(extract_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()))
        .unwrap_or_else(|| {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(body, true);
            detector.guess(None, true)
        });

    let (decoded, _, had_errors) = encoding.decode(body);
    if had_errors {
        return None;
    }
    Some(decoded.into_owned())
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            // Remove quotes if present
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Fetches pages over HTTP(S) with a blocking reqwest client.
///
/// The client is built on first use, so constructing a fetcher is cheap.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    opts: Options,
    client: OnceCell<reqwest::blocking::Client>,
}

impl HttpFetcher {
    pub fn new(opts: Options) -> Self {
        let client = OnceCell::new();
        if let Some(preset) = opts.http_client.clone() {
            let _ = client.set(preset);
        }
        Self { opts, client }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    fn client(&self, url: &str) -> Result<&reqwest::blocking::Client, ScrapeError> {
        self.client.get_or_try_init(|| {
            reqwest::blocking::Client::builder()
                .user_agent(&self.opts.user_agent)
                .timeout(self.opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        url,
                        "Fetch",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Rejects bodies larger than [`MAX_CONTENT_LENGTH`].
fn ensure_within_limit(url: &str, len: usize) -> Result<(), ScrapeError> {
    if len > MAX_CONTENT_LENGTH {
        return Err(ScrapeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!(
                "content too large: {} bytes (limit {})",
                len,
                MAX_CONTENT_LENGTH
            )),
        ));
    }
    Ok(())
}

/// Maps a reqwest failure to a Timeout or Fetch error.
fn request_error(url: &str, what: &str, err: reqwest::Error) -> ScrapeError {
    if err.is_timeout() {
        ScrapeError::timeout(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    } else {
        ScrapeError::fetch(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResult, ScrapeError> {
        // Validate URL is non-empty
        if url.is_empty() {
            return Err(ScrapeError::invalid_url(url, "Fetch", None));
        }

        // Parse and validate URL
        let parsed_url = url::Url::parse(url).map_err(|e| {
            ScrapeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;

        // Check scheme
        let scheme = parsed_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ScrapeError::invalid_url(
                url,
                "Fetch",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let client = self.client(url)?;

        // Build request
        let mut request = client.get(parsed_url);
        for (key, value) in &self.opts.headers {
            request = request.header(key, value);
        }

        info!(url = %url, "fetching page");
        let response = request
            .send()
            .map_err(|e| request_error(url, "request failed", e))?;

        // Check Content-Length header before reading body
        if let Some(len) = response.content_length() {
            ensure_within_limit(url, usize::try_from(len).unwrap_or(usize::MAX))?;
        }

        // Capture response metadata before consuming the response
        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        if !status.is_success() {
            return Err(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
            ));
        }

        let body = response
            .bytes()
            .map_err(|e| request_error(url, "failed to read body", e))?;

        ensure_within_limit(url, body.len())?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), final_url = %final_url, "fetched page");

        Ok(FetchResult {
            status: status.as_u16(),
            url: url.to_string(),
            final_url,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Options {
            user_agent: "test-agent".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<p>hello</p>");
        });

        let result = fetcher().fetch(&server.url("/test"));
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.text().unwrap(), "<p>hello</p>");
    }

    #[test]
    fn test_fetch_sends_user_agent_and_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ua")
                .header("user-agent", "test-agent")
                .header("x-extra", "1");
            then.status(200).body("ok");
        });

        let mut opts = fetcher().options().clone();
        opts.headers.insert("X-Extra".to_string(), "1".to_string());
        let result = HttpFetcher::new(opts).fetch(&server.url("/ua"));
        mock.assert();
        assert!(result.is_ok());
    }

    #[test]
    fn test_fetch_non_2xx_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notfound");
            then.status(404).body("not found");
        });

        let result = fetcher().fetch(&server.url("/notfound"));
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert!(err.is_fetch());
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("HTTP status 404"));
    }

    #[test]
    fn test_fetch_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body("late");
        });

        let slow = HttpFetcher::new(Options {
            timeout: Duration::from_millis(200),
            ..Default::default()
        });
        let err = slow
            .fetch(&server.url("/slow"))
            .expect_err("should time out");
        assert!(err.is_timeout());
        assert!(err.is_fetch());
    }

    #[test]
    fn test_fetch_rejects_bad_urls() {
        let f = fetcher();
        assert!(f.fetch("").unwrap_err().is_invalid_url());
        assert!(f.fetch("not a url").unwrap_err().is_invalid_url());
        assert!(f.fetch("ftp://example.com/file").unwrap_err().is_invalid_url());
    }

    #[test]
    fn test_fetch_rejects_oversized_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/huge");
            then.status(200)
                .header("content-type", "text/html")
                .body(vec![b'a'; MAX_CONTENT_LENGTH + 1]);
        });

        let err = fetcher()
            .fetch(&server.url("/huge"))
            .expect_err("oversized body should fail");
        mock.assert();
        assert!(err.is_fetch());
        assert!(err.to_string().contains("content too large"));
    }

    #[test]
    fn test_fetch_accepts_body_at_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/full");
            then.status(200)
                .header("content-type", "text/html")
                .body(vec![b'a'; MAX_CONTENT_LENGTH]);
        });

        let result = fetcher()
            .fetch(&server.url("/full"))
            .expect("body at the limit should pass");
        assert_eq!(result.body.len(), MAX_CONTENT_LENGTH);
    }

    #[test]
    fn test_ensure_within_limit_boundary() {
        assert!(ensure_within_limit("u", MAX_CONTENT_LENGTH).is_ok());
        let err = ensure_within_limit("u", MAX_CONTENT_LENGTH + 1).unwrap_err();
        assert!(err.is_fetch());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_decode_iso_8859_1_with_chardetng() {
        // "café" in ISO-8859-1 (e-acute = 0xe9)
        let iso_bytes: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        assert_eq!(decode_body(iso_bytes, None).as_deref(), Some("café"));
    }

    #[test]
    fn test_decode_with_declared_charset() {
        let decoded = decode_body(&[0x63, 0x61, 0x66, 0xe9], Some("text/html; charset=iso-8859-1"));
        assert_eq!(decoded.as_deref(), Some("café"));
    }

    #[test]
    fn test_malformed_utf8_is_parse_error() {
        let result = FetchResult {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Bytes::from_static(b"<p>ok\xff\xfe</p>"),
            ..FetchResult::from_html("https://example.com/", "")
        };
        let err = result.text().expect_err("invalid utf-8 should not decode");
        assert!(err.is_parse());
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=utf-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=ISO-8859-1"),
            Some("iso-8859-1".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn test_from_html_round_trips_text() {
        let result = FetchResult::from_html("https://example.com/", "<h1>héllo</h1>");
        assert_eq!(result.status, 200);
        assert_eq!(result.text().unwrap(), "<h1>héllo</h1>");
    }
}
