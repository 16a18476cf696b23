// ABOUTME: Metadata extraction: the <title> text, the meta description and other named meta tags.
// ABOUTME: Other meta tags are keyed by name, falling back to property; the first occurrence wins.

use crate::dom::Node;
use crate::result::Metadata;

/// Extract page metadata.
///
/// - `title`: trimmed text of the first `<title>`, or empty.
/// - `meta_description`: `content` of the first `<meta name="description">`
///   (name compared case-insensitively), or empty.
/// - every other `<meta>` carrying a non-empty `name` (or, failing that, a
///   `property`) and a `content` lands in [`Metadata::other`]. A
///   `property="description"` tag is ignored so it cannot shadow the
///   description.
pub fn extract_metadata<'a, N: Node<'a>>(root: N) -> Metadata {
    let mut meta = Metadata {
        title: root
            .find_all(&["title"])
            .first()
            .map(|t| t.text().trim().to_string())
            .unwrap_or_default(),
        ..Default::default()
    };

    let mut description: Option<String> = None;
    for tag in root.find_all(&["meta"]) {
        let name = tag.attr("name");
        if name.is_some_and(|n| n.trim().eq_ignore_ascii_case("description")) {
            if description.is_none() {
                description = tag.attr("content").map(str::to_string);
            }
            continue;
        }

        let key = name
            .filter(|n| !n.is_empty())
            .or_else(|| tag.attr("property"));
        if let (Some(key), Some(content)) = (key, tag.attr("content")) {
            // `meta_description` is reserved for name="description".
            if key.is_empty()
                || content.is_empty()
                || key.trim().eq_ignore_ascii_case("description")
            {
                continue;
            }
            meta.insert_other(key, content);
        }
    }
    meta.meta_description = description.unwrap_or_default();

    meta
}
