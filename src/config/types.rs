use serde::Deserialize;

/// Main configuration structure for Kumo-Atlas
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub crawl: CrawlTarget,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub exclude: Vec<DomainEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of concurrent fetch workers
    #[serde(rename = "max-workers")]
    pub max_workers: u32,

    /// Maximum link distance from the root to crawl
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Restrict the crawl to the root URL's authority
    #[serde(rename = "within-domain")]
    pub within_domain: bool,

    /// Per-fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: 1,
            max_depth: 3,
            within_domain: true,
            fetch_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "KumoAtlas".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.invalid/kumo-atlas".to_string(),
            contact_email: "kumo-atlas@example.invalid".to_string(),
        }
    }
}

/// Where the crawl starts
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlTarget {
    /// Root URL the crawl expands from
    pub root: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the markdown site map is written to
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: "./atlas.md".to_string(),
        }
    }
}

/// Domain pattern excluded from the frontier
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    /// Domain pattern (e.g., "ads.example.com" or "*.ads.example.com")
    pub domain: String,
}
