use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or None if the URL has no
/// host (which cannot happen for normalized http(s) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumo_atlas::url::extract_domain;
///
/// let url = Url::parse("https://Blog.Example.com/post").unwrap();
/// assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Compares the authority component of two URLs
///
/// Two URLs share an authority when their hosts match and their effective
/// ports match (an omitted port counts as the scheme default, so
/// `https://example.com` and `https://example.com:443` agree).
pub fn same_authority(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
