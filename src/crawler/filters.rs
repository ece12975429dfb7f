//! Frontier admission filters
//!
//! A filter is a predicate over a candidate page; the chain composes with
//! logical AND, so a candidate reaches the fetch pool only if every filter
//! admits it. Filters are registered before a crawl starts and apply for
//! that run only; they are never applied retroactively to visited pages.

use std::sync::Arc;

use url::Url;

use crate::graph::Page;
use crate::url::{extract_domain, matches_wildcard, same_authority};

/// Admission predicate over a candidate page
pub type PageFilter = Arc<dyn Fn(&Page) -> bool + Send + Sync>;

/// Ordered AND-composed set of page filters
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<PageFilter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: PageFilter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when every filter admits the page
    pub fn admits(&self, page: &Page) -> bool {
        self.filters.iter().all(|filter| filter(page))
    }
}

/// Built-in same-domain filter
///
/// Admits pages whose URL authority (host and effective port) matches the
/// crawl root's authority.
pub fn within_authority(root: &Url) -> PageFilter {
    let root = root.clone();
    Arc::new(move |page: &Page| same_authority(page.url(), &root))
}

/// Filter rejecting pages on domains matching a wildcard pattern
///
/// Pattern syntax is that of [`matches_wildcard`]; pages without an
/// extractable domain are rejected outright.
pub fn exclude_domain(pattern: &str) -> PageFilter {
    let pattern = pattern.to_string();
    Arc::new(move |page: &Page| match extract_domain(page.url()) {
        Some(domain) => !matches_wildcard(&pattern, &domain),
        None => false,
    })
}
