//! Crawl summary statistics
//!
//! Gathers counts from a finished crawl for display and export.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::crawler::WebCrawler;
use crate::url::extract_domain;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Pages whose fetch completed
    pub pages_visited: usize,

    /// All nodes in the graph, including discovered-but-unfetched targets
    pub pages_discovered: usize,

    /// Directed link relations recorded
    pub edge_count: usize,

    /// Visited pages whose fetch failed
    pub fetch_failures: usize,

    /// Node counts per domain, sorted by domain
    pub pages_per_domain: BTreeMap<String, usize>,
}

impl CrawlSummary {
    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Builds a summary from a crawler after a run
pub fn summarize(
    crawler: &WebCrawler,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
) -> CrawlSummary {
    let graph = crawler.graph();

    let mut pages_per_domain = BTreeMap::new();
    for page in graph.pages() {
        if let Some(domain) = extract_domain(page.url()) {
            *pages_per_domain.entry(domain).or_insert(0) += 1;
        }
    }

    let fetch_failures = crawler
        .visited()
        .iter()
        .filter(|url| graph.page(url).is_some_and(|page| !page.is_loaded()))
        .count();

    CrawlSummary {
        started_at,
        finished_at,
        pages_visited: crawler.visited().len(),
        pages_discovered: graph.page_count(),
        edge_count: graph.edge_count(),
        fetch_failures,
        pages_per_domain,
    }
}

/// Prints a summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Pages visited: {}", summary.pages_visited);
    println!("  Pages discovered: {}", summary.pages_discovered);
    println!("  Links recorded: {}", summary.edge_count);
    println!("  Fetch failures: {}", summary.fetch_failures);
    println!("  Duration: {:.1}s", summary.duration_secs());
    println!();

    if !summary.pages_per_domain.is_empty() {
        println!("Pages per domain:");
        for (domain, count) in &summary.pages_per_domain {
            println!("  {}: {}", domain, count);
        }
        println!();
    }

    let success_rate = if summary.pages_visited > 0 {
        let fetched = summary.pages_visited - summary.fetch_failures;
        (fetched as f64 / summary.pages_visited as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success rate: {:.1}% ({} / {} fetches succeeded)",
        success_rate,
        summary.pages_visited - summary.fetch_failures,
        summary.pages_visited
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn summary() -> CrawlSummary {
        let started_at = Utc::now();
        CrawlSummary {
            started_at,
            finished_at: started_at + TimeDelta::seconds(90),
            pages_visited: 10,
            pages_discovered: 14,
            edge_count: 23,
            fetch_failures: 2,
            pages_per_domain: BTreeMap::from([("example.com".to_string(), 14)]),
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(summary().duration_secs(), 90.0);
    }

    #[test]
    fn test_duration_never_negative() {
        let mut s = summary();
        s.finished_at = s.started_at - TimeDelta::seconds(5);
        assert_eq!(s.duration_secs(), 0.0);
    }
}
