use serde::Deserialize;

/// Default depth (hops from the seed, inclusive of the seed page) used by the
/// CLI when none is given.
pub const DEFAULT_DEPTH: usize = 2;

/// Crawler resource configuration
///
/// All three limits are pool/admission bounds; none of them affects which
/// pages are visited, only how much runs at once.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Size of the download worker pool
    #[serde(default = "default_downloaders")]
    pub downloaders: usize,

    /// Size of the link-extraction worker pool
    #[serde(default = "default_extractors")]
    pub extractors: usize,

    /// Maximum concurrent downloads per origin host
    #[serde(rename = "per-host", default = "default_per_host")]
    pub per_host: usize,
}

fn default_downloaders() -> usize {
    16
}

fn default_extractors() -> usize {
    16
}

fn default_per_host() -> usize {
    4
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            downloaders: default_downloaders(),
            extractors: default_extractors(),
            per_host: default_per_host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.downloaders, 16);
        assert_eq!(config.extractors, 16);
        assert_eq!(config.per_host, 4);
    }
}
