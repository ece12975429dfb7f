//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests that capture status, headers, raw body, and encoding
//! - HEAD requests as an optional header-only mode
//! - Classifying transport failures into typed errors

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::UserAgentConfig;
use crate::graph::FetchedDocument;
use crate::{AtlasError, Result};

/// Request mode for a fetch
///
/// HEAD returns header data with an empty body and never counts as loading
/// a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Get,
    Head,
}

/// Builds the HTTP client shared by all fetch workers
///
/// The user agent follows the `Name/Version (+ContactURL; ContactEmail)`
/// convention. `timeout_secs` bounds the whole request; it is a
/// configuration knob, not a correctness requirement of the crawl.
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout_secs: u64,
) -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and captures the response as a document
///
/// Any HTTP response, including 4xx/5xx, yields a document; only transport
/// failures are errors. Timeouts classify as [`AtlasError::Timeout`], every
/// other transport failure as [`AtlasError::Http`].
pub async fn fetch_url(client: &Client, url: &Url, mode: FetchMode) -> Result<FetchedDocument> {
    tracing::debug!(url = %url, ?mode, "Fetching");

    let request = match mode {
        FetchMode::Get => client.get(url.clone()),
        FetchMode::Head => client.head(url.clone()),
    };

    let response = request
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status().as_u16();

    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_string(), value.to_string());
        }
    }

    let encoding = headers.get("content-type").and_then(|ct| charset_of(ct));

    let body = match mode {
        FetchMode::Get => response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?
            .to_vec(),
        FetchMode::Head => Vec::new(),
    };

    Ok(FetchedDocument {
        status,
        headers,
        body,
        encoding,
    })
}

fn classify_error(url: &Url, error: reqwest::Error) -> AtlasError {
    if error.is_timeout() {
        AtlasError::Timeout {
            url: url.to_string(),
        }
    } else {
        AtlasError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Extracts the charset parameter from a Content-Type header value
fn charset_of(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_ascii_lowercase())
    })
}
