//! Markdown site-map export

use std::fmt::Write as _;
use std::path::Path;

use crate::graph::WebGraph;
use crate::output::CrawlSummary;
use crate::Result;

/// Writes the crawled link map as a markdown document
///
/// Pages are listed sorted by URL, each with its fetch status and outgoing
/// links, so diffs between runs stay readable.
pub fn write_markdown_map(graph: &WebGraph, summary: &CrawlSummary, path: &Path) -> Result<()> {
    let content = render_markdown(graph, summary);
    std::fs::write(path, content)?;
    Ok(())
}

fn render_markdown(graph: &WebGraph, summary: &CrawlSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Site map");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Generated {}.",
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} pages visited, {} discovered, {} links, {} failures, {:.1}s.",
        summary.pages_visited,
        summary.pages_discovered,
        summary.edge_count,
        summary.fetch_failures,
        summary.duration_secs()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "## Pages");

    let mut pages: Vec<_> = graph.pages().collect();
    pages.sort_by(|a, b| a.url().as_str().cmp(b.url().as_str()));

    for page in pages {
        let _ = writeln!(out);
        let status = match page.document() {
            Ok(doc) => format!("HTTP {}", doc.status),
            Err(_) => "not fetched".to_string(),
        };
        let _ = writeln!(out, "### {} ({})", page.url(), status);

        if let Some(succs) = graph.successors(page.url()) {
            let mut targets: Vec<_> = succs.iter().map(|u| u.as_str()).collect();
            targets.sort_unstable();
            for target in targets {
                let _ = writeln!(out, "- {}", target);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use url::Url;

    fn summary() -> CrawlSummary {
        let now = Utc::now();
        CrawlSummary {
            started_at: now,
            finished_at: now,
            pages_visited: 2,
            pages_discovered: 2,
            edge_count: 1,
            fetch_failures: 0,
            pages_per_domain: BTreeMap::new(),
        }
    }

    #[test]
    fn test_render_lists_pages_and_links() {
        let mut graph = WebGraph::new();
        graph.add_relation(
            &Url::parse("http://a.com/").unwrap(),
            &Url::parse("http://a.com/child").unwrap(),
            true,
        );

        let rendered = render_markdown(&graph, &summary());

        assert!(rendered.contains("# Site map"));
        assert!(rendered.contains("### http://a.com/ (not fetched)"));
        assert!(rendered.contains("- http://a.com/child"));
    }

    #[test]
    fn test_render_sorted_by_url() {
        let mut graph = WebGraph::new();
        graph.add_relation(
            &Url::parse("http://a.com/zzz").unwrap(),
            &Url::parse("http://a.com/aaa").unwrap(),
            true,
        );

        let rendered = render_markdown(&graph, &summary());
        let aaa = rendered.find("### http://a.com/aaa").unwrap();
        let zzz = rendered.find("### http://a.com/zzz").unwrap();
        assert!(aaa < zzz);
    }

    #[test]
    fn test_write_to_file() {
        let graph = WebGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.md");

        write_markdown_map(&graph, &summary(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("# Site map"));
    }
}
