// ABOUTME: Link and image extraction, plus resolution of hrefs against the page URL.
// ABOUTME: Links carry both the resolved absolute URL and the raw href; image src is kept raw.

use tracing::warn;
use url::Url;

use crate::dom::Node;
use crate::result::{ImageEntry, LinkEntry};

/// Resolve `href` against `base` with WHATWG URL rules.
///
/// Absolute hrefs pass through, scheme-relative, path-relative and
/// fragment-only ones are joined onto the base. Returns `None` when the
/// href cannot be parsed even relative to the base.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

/// Every `<a href>` in document order. Anchors without `href` are skipped.
///
/// An href that cannot be resolved keeps its entry, with `url` set to the
/// base itself so the field stays absolute.
pub fn extract_links<'a, N: Node<'a>>(root: N, base: &Url) -> Vec<LinkEntry> {
    root.find_all(&["a"])
        .iter()
        .filter_map(|a| {
            let href = a.attr("href")?;
            let url = match resolve_url(base, href) {
                Some(url) => url,
                None => {
                    warn!(href = %href, base = %base, "could not resolve link, using page URL");
                    base.clone()
                }
            };
            Some(LinkEntry {
                text: a.text().trim().to_string(),
                url: url.to_string(),
                relative_url: href.to_string(),
            })
        })
        .collect()
}

/// Every `<img>` with its raw `alt`, `src` and `title` attributes.
pub fn extract_images<'a, N: Node<'a>>(root: N) -> Vec<ImageEntry> {
    let attr = |img: &N, name: &str| img.attr(name).unwrap_or_default().to_string();
    root.find_all(&["img"])
        .iter()
        .map(|img| ImageEntry {
            alt: attr(img, "alt"),
            src: attr(img, "src"),
            title: attr(img, "title"),
        })
        .collect()
}
