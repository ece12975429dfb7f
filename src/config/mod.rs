//! Configuration module for Kumo-Atlas
//!
//! Configuration is a TOML file with kebab-case keys, loaded, validated,
//! and hashed for change detection.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlTarget, CrawlerConfig, DomainEntry, OutputConfig, UserAgentConfig};
pub use validation::validate;
