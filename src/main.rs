//! Kumo-Atlas main entry point
//!
//! Command-line interface for the Kumo-Atlas site mapper.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kumo_atlas::config::{load_config_with_hash, Config};
use kumo_atlas::crawler::{exclude_domain, WebCrawler};
use kumo_atlas::graph::{Page, WebGraph};
use kumo_atlas::output::{print_summary, summarize, write_markdown_map};
use kumo_atlas::url::normalize_url;

/// Kumo-Atlas: a concurrent site mapper
///
/// Crawls a site from a root URL, builds the link graph, and exports a
/// markdown site map.
#[derive(Parser, Debug)]
#[command(name = "kumo-atlas")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent site mapper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// After the crawl, print the shortest link path between two URLs
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    route: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let mut crawler = WebCrawler::new(&config.crawler, &config.user_agent)?.with_callback(
        Arc::new(|record| match &record.outcome {
            Ok(doc) => tracing::info!("{} [{}]", record.url, doc.status),
            Err(err) => tracing::warn!("{} failed: {}", record.url, err),
        }),
    );

    for entry in &config.exclude {
        crawler.add_filter(exclude_domain(&entry.domain));
    }

    // Ctrl-C cancels the crawl; fetches that already finished are kept.
    let cancel = crawler.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping crawl");
            cancel.cancel();
        }
    });

    let root = Page::new(&config.crawl.root)?;
    let started_at = chrono::Utc::now();
    crawler
        .search(root, config.crawler.max_depth, config.crawler.within_domain)
        .await?;
    let finished_at = chrono::Utc::now();

    let summary = summarize(&crawler, started_at, finished_at);
    print_summary(&summary);

    write_markdown_map(crawler.graph(), &summary, Path::new(&config.output.summary_path))?;
    println!("\nSite map written to: {}", config.output.summary_path);

    if let Some(route) = &cli.route {
        handle_route(crawler.graph(), &route[0], &route[1])?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo_atlas=info,warn"),
            1 => EnvFilter::new("kumo_atlas=debug,info"),
            2 => EnvFilter::new("kumo_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --dry-run: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Kumo-Atlas Dry Run ===\n");

    println!("Crawl:");
    println!("  Root: {}", config.crawl.root);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Within domain: {}", config.crawler.within_domain);

    println!("\nCrawler:");
    println!("  Workers: {}", config.crawler.max_workers);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nUser Agent:");
    println!(
        "  {}/{} (+{}; {})",
        config.user_agent.crawler_name,
        config.user_agent.crawler_version,
        config.user_agent.contact_url,
        config.user_agent.contact_email
    );

    println!("\nOutput:");
    println!("  Summary: {}", config.output.summary_path);

    if !config.exclude.is_empty() {
        println!("\nExcluded domains ({}):", config.exclude.len());
        for entry in &config.exclude {
            println!("  - {}", entry.domain);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles --route: prints the shortest link path between two crawled URLs
fn handle_route(graph: &WebGraph, from: &str, to: &str) -> Result<(), Box<dyn std::error::Error>> {
    let from = normalize_url(from)?;
    let to = normalize_url(to)?;

    println!("\nRoute from {} to {}:", from, to);
    match graph.shortest_path(&from, &to) {
        Some(path) => {
            for (hop, page) in path.iter().enumerate() {
                println!("  {}. {}", hop + 1, page.url());
            }
        }
        None => println!("  (no path found)"),
    }

    Ok(())
}
