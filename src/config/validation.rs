use url::Url;

use crate::config::types::{Config, CrawlTarget, CrawlerConfig, DomainEntry, UserAgentConfig};
use crate::url::normalize_url;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler(&config.crawler)?;
    validate_user_agent(&config.user_agent)?;
    validate_crawl(&config.crawl)?;
    validate_excludes(&config.exclude)?;

    if config.output.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawler(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !(1..=64).contains(&config.max_workers) {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 64, got {}",
            config.max_workers
        )));
    }

    if config.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch_timeout_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty()
        || !config
            .crawler_name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must be non-empty alphanumeric/hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_crawl(config: &CrawlTarget) -> Result<(), ConfigError> {
    // The root must survive identity normalization, which also enforces the
    // http(s)-with-host requirement.
    normalize_url(&config.root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid crawl root '{}': {}", config.root, e)))?;
    Ok(())
}

fn validate_excludes(entries: &[DomainEntry]) -> Result<(), ConfigError> {
    for entry in entries {
        validate_domain_pattern(&entry.domain)?;
    }
    Ok(())
}

/// Validates a domain pattern, with or without the `*.` wildcard prefix
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    let well_formed = !domain.is_empty()
        && domain.contains('.')
        && !domain.contains("..")
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
        && domain
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::InvalidPattern(format!(
            "'{}' is not a valid domain pattern",
            pattern
        )))
    }
}

fn validate_email(email: &str) -> Result<(), ConfigError> {
    let valid = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    );

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "Invalid contact_email: '{}'",
            email
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            crawl: CrawlTarget {
                root: "https://example.com/".to_string(),
            },
            output: Default::default(),
            exclude: vec![DomainEntry {
                domain: "*.ads.example.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = valid_config();
        config.crawler.max_workers = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut config = valid_config();
        config.crawler.max_workers = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.crawler.fetch_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_root_rejected() {
        let mut config = valid_config();
        config.crawl.root = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_bad_crawler_name_rejected() {
        let mut config = valid_config();
        config.user_agent.crawler_name = "has spaces".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_domain_patterns() {
        assert!(validate_domain_pattern("example.com").is_ok());
        assert!(validate_domain_pattern("*.example.com").is_ok());
        assert!(validate_domain_pattern("sub.example.co.uk").is_ok());

        assert!(validate_domain_pattern("").is_err());
        assert!(validate_domain_pattern("*.").is_err());
        assert!(validate_domain_pattern("nodot").is_err());
        assert!(validate_domain_pattern(".leading.com").is_err());
        assert!(validate_domain_pattern("trailing.com.").is_err());
        assert!(validate_domain_pattern("dou..ble.com").is_err());
        assert!(validate_domain_pattern("bad domain.com").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("plain").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }
}
