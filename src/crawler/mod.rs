//! Crawler module for concurrent page fetching
//!
//! This module contains the crawl machinery:
//! - HTTP fetching with typed error classification
//! - HTML link extraction
//! - Frontier admission filters
//! - The crawl engine coordinating a bounded worker pool

mod engine;
mod fetcher;
mod filters;
mod parser;

pub use engine::{CancelToken, FetchCallback, FetchRecord, RunState, WebCrawler};
pub use fetcher::{build_http_client, fetch_url, FetchMode};
pub use filters::{exclude_domain, within_authority, FilterChain, PageFilter};
pub use parser::extract_links;
