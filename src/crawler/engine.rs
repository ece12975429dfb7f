//! Crawl engine: frontier scheduling over a bounded worker pool
//!
//! The engine fetches pages concurrently, folds completed fetches into the
//! reachability graph, recomputes the expandable frontier from the graph
//! itself, and gates frontier admission through the filter chain.
//!
//! Concurrency model: workers only fetch and return values. The engine's
//! drain step is the single writer of the graph and of the visited set, so
//! no graph method needs a lock. Completion is observed by awaiting the
//! worker pool rather than polling.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use url::Url;

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchMode};
use crate::crawler::filters::{within_authority, FilterChain, PageFilter};
use crate::crawler::parser::extract_links;
use crate::graph::{FetchedDocument, Page, WebGraph};
use crate::{AtlasError, Result};

/// Cooperative cancellation flag for a crawl run
///
/// Cheap to clone; all clones share the flag. The engine checks it between
/// scheduling rounds: once cancelled, no new fetches are submitted, fetches
/// that already finished are still folded into the graph, and fetches still
/// in flight are abandoned.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// One completed fetch, success- or error-shaped
///
/// This is what the completion callback receives; it fires exactly once per
/// completed fetch and never for pages filtered out before fetching.
#[derive(Debug)]
pub struct FetchRecord {
    pub url: Url,
    pub outcome: Result<FetchedDocument>,
}

impl FetchRecord {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Completion callback invoked for every finished fetch
pub type FetchCallback = Arc<dyn Fn(&FetchRecord) + Send + Sync>;

/// States of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    /// Cancellation observed: finishing already-completed work only
    Draining,
    Completed,
}

/// Concurrent crawl scheduler
///
/// One crawler runs one crawl at a time; `visited` and in-flight state are
/// reset per [`WebCrawler::search`] call, while the graph persists so
/// results stay queryable after the run.
pub struct WebCrawler {
    client: Client,
    max_workers: usize,
    graph: WebGraph,
    external_filters: Vec<PageFilter>,
    callback: Option<FetchCallback>,
    visited: HashSet<Url>,
    cancel: CancelToken,
    state: RunState,
}

impl WebCrawler {
    /// Creates a crawler from configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self> {
        let client = build_http_client(user_agent, crawler.fetch_timeout_secs)?;

        Ok(Self {
            client,
            max_workers: crawler.max_workers.max(1) as usize,
            graph: WebGraph::new(),
            external_filters: Vec::new(),
            callback: None,
            visited: HashSet::new(),
            cancel: CancelToken::new(),
            state: RunState::Idle,
        })
    }

    /// Installs the completion callback
    pub fn with_callback(mut self, callback: FetchCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Registers an additional frontier filter for subsequent crawls
    pub fn add_filter(&mut self, filter: PageFilter) {
        self.external_filters.push(filter);
    }

    /// Returns a handle that cancels the running crawl when triggered
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The reachability graph built so far
    pub fn graph(&self) -> &WebGraph {
        &self.graph
    }

    /// Pages whose fetch completed during the last crawl
    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Crawls from `root`, following links up to `max_depth` hops away
    ///
    /// With `within_domain` set, only pages sharing the root's authority are
    /// fetched. Results are observed through [`WebCrawler::graph`],
    /// [`WebCrawler::visited`], and the completion callback; per-fetch
    /// failures never abort the run.
    pub async fn search(&mut self, root: Page, max_depth: u32, within_domain: bool) -> Result<()> {
        let root_url = root.url().clone();

        self.visited.clear();
        self.state = RunState::Running;
        tracing::info!(root = %root_url, max_depth, within_domain, "Starting crawl");

        let mut chain = FilterChain::new();
        if within_domain {
            chain.push(within_authority(&root_url));
        }
        for filter in &self.external_filters {
            chain.push(filter.clone());
        }

        self.graph.add_page(root, None);

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut pool: JoinSet<FetchRecord> = JoinSet::new();
        let mut in_flight: HashSet<Url> = HashSet::new();

        self.submit(&mut pool, &semaphore, root_url.clone());
        in_flight.insert(root_url.clone());

        loop {
            // Wait for the next completion; returns None once nothing is in
            // flight and no new work was submitted last round.
            let Some(joined) = pool.join_next().await else {
                break;
            };
            self.apply_completed(joined, &mut in_flight);

            // Drain everything else that already finished before recomputing
            // the frontier.
            while let Some(extra) = pool.try_join_next() {
                self.apply_completed(extra, &mut in_flight);
            }

            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation requested, draining finished fetches");
                self.state = RunState::Draining;
                while let Some(extra) = pool.try_join_next() {
                    self.apply_completed(extra, &mut in_flight);
                }
                // Abandon whatever is still in flight.
                pool.shutdown().await;
                break;
            }

            // The frontier is recomputed from the graph itself, so edges
            // discovered by any worker are reflected immediately.
            let Some(frontier) = self.graph.neighbors_within_distance(&root_url, max_depth)
            else {
                break;
            };

            for url in frontier.into_keys() {
                if self.visited.contains(&url) || in_flight.contains(&url) {
                    continue;
                }
                let Some(page) = self.graph.page(&url) else {
                    continue;
                };
                if !chain.admits(page) {
                    continue;
                }
                tracing::debug!(url = %url, "Scheduling fetch");
                self.submit(&mut pool, &semaphore, url.clone());
                in_flight.insert(url);
            }
        }

        if self.state == RunState::Draining {
            tracing::info!(pages = self.visited.len(), "Crawl cancelled");
        } else {
            self.state = RunState::Completed;
            tracing::info!(
                pages = self.visited.len(),
                nodes = self.graph.page_count(),
                edges = self.graph.edge_count(),
                "Crawl completed"
            );
        }

        Ok(())
    }

    /// Spawns one fetch worker for `url`
    ///
    /// The semaphore bounds concurrent fetches to `max_workers`; a queued
    /// worker holds no resources until it acquires a permit.
    fn submit(&self, pool: &mut JoinSet<FetchRecord>, semaphore: &Arc<Semaphore>, url: Url) {
        let client = self.client.clone();
        let semaphore = Arc::clone(semaphore);

        pool.spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => fetch_url(&client, &url, FetchMode::Get).await,
                // The pool is shutting down under cancellation.
                Err(_) => Err(AtlasError::Cancelled {
                    url: url.to_string(),
                }),
            };
            FetchRecord { url, outcome }
        });
    }

    /// Folds one completed fetch into the crawl state
    ///
    /// This is the only place the graph and the visited set are written.
    fn apply_completed(
        &mut self,
        joined: std::result::Result<FetchRecord, JoinError>,
        in_flight: &mut HashSet<Url>,
    ) {
        let record = match joined {
            Ok(record) => record,
            Err(error) => {
                tracing::error!("Fetch worker failed: {error}");
                return;
            }
        };

        in_flight.remove(&record.url);

        if let Some(callback) = &self.callback {
            callback(&record);
        }

        // Completed means never refetched this run, success or not.
        self.visited.insert(record.url.clone());

        match record.outcome {
            Ok(document) => {
                tracing::debug!(url = %record.url, status = document.status, "Fetched");

                // Non-textual responses contribute no links.
                let links = if document.is_text() {
                    extract_links(&document.decoded_body(), &record.url)
                } else {
                    Vec::new()
                };
                for target in links {
                    self.graph
                        .add_page(Page::from_url(target), Some(&record.url));
                }
                if let Some(page) = self.graph.page_mut(&record.url) {
                    page.set_document(document);
                }
            }
            Err(error) => {
                // Failed pages stay in the graph as unloaded nodes and
                // contribute no outgoing edges.
                tracing::warn!(url = %record.url, "Fetch failed: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_crawler() -> WebCrawler {
        let config = CrawlerConfig {
            fetch_timeout_secs: 5,
            ..CrawlerConfig::default()
        };
        WebCrawler::new(&config, &UserAgentConfig::default()).unwrap()
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_initial_state_is_idle() {
        let crawler = test_crawler();
        assert_eq!(crawler.state(), RunState::Idle);
        assert!(crawler.visited().is_empty());
        assert_eq!(crawler.graph().page_count(), 0);
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        let config = CrawlerConfig {
            max_workers: 0,
            ..CrawlerConfig::default()
        };
        let crawler = WebCrawler::new(&config, &UserAgentConfig::default()).unwrap();
        assert_eq!(crawler.max_workers, 1);
    }

    #[tokio::test]
    async fn test_single_page_crawl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html><body>leaf</body></html>"),
            )
            .mount(&server)
            .await;

        let mut crawler = test_crawler();
        let root = Page::new(&format!("{}/", server.uri())).unwrap();
        let root_url = root.url().clone();

        crawler.search(root, 3, true).await.unwrap();

        assert_eq!(crawler.state(), RunState::Completed);
        assert_eq!(crawler.visited().len(), 1);
        assert!(crawler.graph().page(&root_url).unwrap().is_loaded());
    }
}
