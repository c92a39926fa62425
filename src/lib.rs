//! Fathom: a depth-bounded concurrent web crawler
//!
//! Fathom downloads pages starting from a seed URL, extracts outbound links,
//! and recursively visits them up to a fixed depth, while bounding both the
//! number of simultaneous downloads per origin host and the total concurrency
//! of the download and link-extraction pools.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Fathom operations
#[derive(Debug, Error)]
pub enum FathomError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no host component")]
    MissingHost,
}

/// Per-URL failure produced while crawling.
///
/// `Malformed`, `Http`, and `Network` end up keyed by URL in
/// [`crawler::CrawlResult::errors`]. `Extraction` is only ever logged: a
/// failed link extraction is not attributable to any single discovered URL,
/// and the page it came from still counts as successfully downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Link extraction failed: {0}")]
    Extraction(String),
}

/// Result type alias for Fathom operations
pub type Result<T> = std::result::Result<T, FathomError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlResult, Crawler, Document, Downloader, HttpDownloader};
pub use self::url::origin_host;
