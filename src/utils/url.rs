// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Detail URLs shaped like listing pages (`.../page-2.html`).
static PAGE_INDEXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/page-\d+\.").unwrap_or_else(|e| panic!("invalid page pattern: {e}"))
});

/// Resolve a potentially relative URL against a base URL.
///
/// # Examples
/// ```
/// use walkscrape::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://example.com/path/", "page.html"),
///     "https://example.com/path/page.html"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve `href` against `index_url` with its trailing `segment` stripped.
///
/// Already absolute hrefs are returned unchanged.
///
/// # Examples
/// ```
/// use walkscrape::utils::url::resolve_beside;
///
/// assert_eq!(
///     resolve_beside("https://mars.nasa.gov/news/", "/news/", "/news/8716/title/"),
///     "https://mars.nasa.gov/news/8716/title/"
/// );
/// ```
pub fn resolve_beside(index_url: &str, segment: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let base = index_url
        .strip_suffix(segment)
        .or_else(|| index_url.strip_suffix(segment.trim_end_matches('/')))
        .unwrap_or(index_url)
        .trim_end_matches('/');

    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

/// Prefix a root-relative path with a site origin.
pub fn with_origin(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Whether a URL follows the page-indexed listing pattern.
pub fn is_page_indexed(url: &str) -> bool {
    PAGE_INDEXED.is_match(url)
}
