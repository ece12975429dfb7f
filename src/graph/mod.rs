//! Reachability graph over crawled pages
//!
//! This module contains the data model for the crawl result:
//! - Page identity and fetched content
//! - The directed, possibly cyclic graph of link relations
//! - Graph queries: bounded-distance neighbors and shortest path

mod page;
mod web_graph;

pub use page::{FetchedDocument, Page};
pub use web_graph::WebGraph;
