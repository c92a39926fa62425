use crate::config::types::CrawlConfig;
use crate::ConfigError;

/// Validates a crawler configuration
///
/// Every bound must admit at least one unit of work, otherwise the crawl
/// could never make progress.
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.downloaders < 1 {
        return Err(ConfigError::Validation(format!(
            "downloaders must be >= 1, got {}",
            config.downloaders
        )));
    }

    if config.extractors < 1 {
        return Err(ConfigError::Validation(format!(
            "extractors must be >= 1, got {}",
            config.extractors
        )));
    }

    if config.per_host < 1 {
        return Err(ConfigError::Validation(format!(
            "per-host must be >= 1, got {}",
            config.per_host
        )));
    }

    Ok(())
}
