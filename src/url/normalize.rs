use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL string into the canonical form used for page identity
///
/// Two pages are the same node exactly when their normalized URLs are equal,
/// so normalization must be idempotent: normalizing an already-normalized URL
/// yields the same string.
///
/// # Normalization Rules
///
/// 1. Parse the URL; reject if malformed
/// 2. Only `http` and `https` schemes are accepted
/// 3. The URL must have a host
/// 4. The fragment is stripped (anchors never change page identity)
/// 5. The query string is preserved as-is
/// 6. The path is percent-encoded and an empty path becomes `/` (both are
///    guaranteed by the parser for http(s) URLs)
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use kumo_atlas::url::normalize_url;
///
/// let url = normalize_url("http://example.com/page?q=1#section").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page?q=1");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already-parsed URL (used after resolving relative links)
///
/// Applies the same scheme/host checks and fragment stripping as
/// [`normalize_url`], without re-parsing.
pub fn normalize_parsed(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}
