//! HTML parser for extracting links
//!
//! Link extraction walks `<a href>` elements, resolves relative hrefs
//! against the page's own URL, and normalizes the result so every returned
//! URL is graph-ready.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::url::normalize_parsed;

/// Hrefs with these prefixes are never crawl targets
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:", "data:"];

/// Extracts all crawlable links from an HTML body
///
/// Returns deduplicated, normalized absolute URLs. Relative hrefs resolve
/// against `page_url`; `mailto:`/`javascript:`/`tel:`/`data:` targets,
/// fragment-only anchors, and anything that normalizes to a non-http(s)
/// URL are dropped.
///
/// Callers are expected to gate on the response's content type before
/// extracting; this function only looks at the body it is given.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(link) = resolve_href(href, page_url) else {
            continue;
        };
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

/// Resolves one href to a normalized absolute URL
///
/// Returns None for hrefs that should not become crawl targets.
fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let joined = base.join(href).ok()?;
    normalize_parsed(joined).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    fn links_of(html: &str) -> Vec<String> {
        extract_links(html, &base())
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_absolute_link() {
        let links = links_of(r#"<a href="https://other.com/page">x</a>"#);
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_root_relative_link() {
        let links = links_of(r#"<a href="/about">x</a>"#);
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_path_relative_link() {
        let links = links_of(r#"<a href="sibling">x</a>"#);
        assert_eq!(links, vec!["https://example.com/dir/sibling"]);
    }

    #[test]
    fn test_skips_mailto() {
        assert!(links_of(r#"<a href="mailto:x@example.com">x</a>"#).is_empty());
    }

    #[test]
    fn test_skips_javascript_tel_data() {
        let html = r#"
            <a href="javascript:void(0)">a</a>
            <a href="tel:+1555">b</a>
            <a href="data:text/plain,hello">c</a>
        "#;
        assert!(links_of(html).is_empty());
    }

    #[test]
    fn test_skips_fragment_only() {
        assert!(links_of(r##"<a href="#section">x</a>"##).is_empty());
    }

    #[test]
    fn test_fragment_stripped_from_target() {
        let links = links_of(r##"<a href="/page#section">x</a>"##);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_deduplicates() {
        let html = r##"
            <a href="/page">one</a>
            <a href="/page">two</a>
            <a href="/page#anchor">three</a>
        "##;
        assert_eq!(links_of(html).len(), 1);
    }

    #[test]
    fn test_skips_non_http_schemes_after_resolution() {
        assert!(links_of(r#"<a href="ftp://example.com/file">x</a>"#).is_empty());
    }

    #[test]
    fn test_mixed_valid_and_invalid() {
        let html = r#"
            <a href="/valid">a</a>
            <a href="mailto:x@example.com">b</a>
            <a href="https://example.com/other">c</a>
        "#;
        assert_eq!(links_of(html).len(), 2);
    }

    #[test]
    fn test_no_links() {
        assert!(links_of("<html><body>plain text</body></html>").is_empty());
    }
}
