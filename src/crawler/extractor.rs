//! Link extraction
//!
//! Pages are scanned with a tolerant textual pattern for `href="..."`
//! attributes rather than parsed into a DOM, so malformed HTML is never a
//! problem. Every captured reference is resolved against the page URL.

use crate::HarvestError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use url::Url;

/// Deduplicated absolute URLs found on one page
pub type LinkSet = BTreeSet<Url>;

/// Matches `href="..."`, case-insensitive, whitespace allowed around `=`
static HREF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*"([^"\r\n]*)""#).expect("href pattern is valid"));

/// Extracts every hyperlink target in `html` as an absolute URL
///
/// References are resolved against `base_url` following RFC 3986 (relative
/// paths, protocol-relative and fragment-only references included).
/// References that cannot be resolved are logged and skipped.
///
/// # Example
///
/// ```
/// use link_harvest::crawler::extract_links;
/// use url::Url;
///
/// let base = Url::parse("http://example.com").unwrap();
/// let links = extract_links(r#"<a href="/static/assets/">example</a>"#, &base);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("http://example.com/static/assets/").unwrap()));
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> LinkSet {
    let mut links = LinkSet::new();

    for capture in HREF_PATTERN.captures_iter(html) {
        let reference = &capture[1];
        match resolve_reference(reference, base_url) {
            Ok(url) => {
                links.insert(url);
            }
            Err(e) => tracing::error!("Error parsing link: {}", e),
        }
    }

    links
}

/// Resolves one (possibly relative) reference against the page URL
pub fn resolve_reference(reference: &str, base_url: &Url) -> Result<Url, HarvestError> {
    base_url
        .join(reference)
        .map_err(|source| HarvestError::UrlResolution {
            reference: reference.to_string(),
            base: base_url.to_string(),
            source,
        })
}
