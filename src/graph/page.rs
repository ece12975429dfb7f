use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use url::Url;

use crate::url::normalize_url;
use crate::{AtlasError, Result, UrlResult};

/// The response data captured by one fetch of a page
///
/// Any HTTP response is a document, including 4xx/5xx responses; only
/// transport-level failures produce an error instead of a document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// HTTP status code
    pub status: u16,

    /// Response headers, keys lowercased
    pub headers: HashMap<String, String>,

    /// Raw response body
    pub body: Vec<u8>,

    /// Character encoding declared in the Content-Type header, if any
    pub encoding: Option<String>,
}

impl FetchedDocument {
    /// Returns the Content-Type header value, if present
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Returns true for textual responses (`text/*` content types)
    ///
    /// Only textual responses are searched for links.
    pub fn is_text(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.trim_start().starts_with("text"))
    }

    /// Decodes the body for text processing
    ///
    /// UTF-8 with lossy replacement; the declared encoding is kept on the
    /// document for callers that need to transcode differently.
    pub fn decoded_body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// A URL-identified crawl unit with optional fetched content
///
/// Identity is the normalized URL and never changes after construction. Two
/// pages are equal exactly when their normalized URLs are equal, and the
/// hash derives from the URL alone. The fetched document is absent until a
/// fetch completes; a refetch overwrites it.
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    document: Option<FetchedDocument>,
}

impl Page {
    /// Creates an unloaded page from a URL string, normalizing it
    pub fn new(url: &str) -> UrlResult<Self> {
        Ok(Self {
            url: normalize_url(url)?,
            document: None,
        })
    }

    /// Creates an unloaded page from an already-normalized URL
    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            document: None,
        }
    }

    /// The normalized URL identifying this page
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns true once a fetch has populated the page
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// The fetched document
    ///
    /// Reading the document of an unloaded page is a programmer error and
    /// yields [`AtlasError::NotLoaded`] rather than a silent default; check
    /// [`Page::is_loaded`] first.
    pub fn document(&self) -> Result<&FetchedDocument> {
        self.document.as_ref().ok_or_else(|| AtlasError::NotLoaded {
            url: self.url.to_string(),
        })
    }

    pub(crate) fn set_document(&mut self, document: FetchedDocument) {
        self.document = Some(document);
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_document(body: &str) -> FetchedDocument {
        FetchedDocument {
            status: 200,
            headers: HashMap::from([(
                "content-type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )]),
            body: body.as_bytes().to_vec(),
            encoding: Some("utf-8".to_string()),
        }
    }

    #[test]
    fn test_identity_is_normalized() {
        let page = Page::new("http://example.com#top").unwrap();
        assert_eq!(page.url().as_str(), "http://example.com/");
    }

    #[test]
    fn test_equality_by_url_only() {
        let mut a = Page::new("http://example.com/page").unwrap();
        let b = Page::new("http://example.com/page#section").unwrap();
        a.set_document(text_document("<html></html>"));

        assert_eq!(a, b);

        let mut hasher_a = std::collections::hash_map::DefaultHasher::new();
        let mut hasher_b = std::collections::hash_map::DefaultHasher::new();
        a.hash(&mut hasher_a);
        b.hash(&mut hasher_b);
        assert_eq!(hasher_a.finish(), hasher_b.finish());
    }

    #[test]
    fn test_document_before_fetch_is_error() {
        let page = Page::new("http://example.com/").unwrap();
        assert!(!page.is_loaded());
        assert!(matches!(
            page.document(),
            Err(AtlasError::NotLoaded { .. })
        ));
    }

    #[test]
    fn test_document_after_fetch() {
        let mut page = Page::new("http://example.com/").unwrap();
        page.set_document(text_document("hello"));

        assert!(page.is_loaded());
        let doc = page.document().unwrap();
        assert_eq!(doc.status, 200);
        assert_eq!(doc.decoded_body(), "hello");
    }

    #[test]
    fn test_refetch_overwrites_document() {
        let mut page = Page::new("http://example.com/").unwrap();
        page.set_document(text_document("first"));
        page.set_document(text_document("second"));
        assert_eq!(page.document().unwrap().decoded_body(), "second");
    }

    #[test]
    fn test_is_text() {
        let doc = text_document("x");
        assert!(doc.is_text());

        let mut pdf = text_document("x");
        pdf.headers
            .insert("content-type".to_string(), "application/pdf".to_string());
        assert!(!pdf.is_text());

        let mut missing = text_document("x");
        missing.headers.clear();
        assert!(!missing.is_text());
    }

    #[test]
    fn test_decoded_body_lossy() {
        let mut doc = text_document("");
        doc.body = vec![b'o', b'k', 0xff];
        assert!(doc.decoded_body().starts_with("ok"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(Page::new("not a url").is_err());
        assert!(Page::new("ftp://example.com/").is_err());
    }
}
