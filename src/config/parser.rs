use crate::config::types::CrawlConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Missing keys fall back to the built-in defaults; the parsed configuration
/// is validated before being returned.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: CrawlConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("failed to write temp file");
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            downloaders = 8
            extractors = 4
            per-host = 2
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.downloaders, 8);
        assert_eq!(config.extractors, 4);
        assert_eq!(config.per_host, 2);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let file = write_config("downloaders = 32\n");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.downloaders, 32);
        assert_eq!(config.extractors, 16);
        assert_eq!(config.per_host, 4);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let file = write_config("");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.downloaders, 16);
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("downloaders = [not toml");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config("per-host = 0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/fathom.toml");
        assert!(matches!(load_config(path), Err(ConfigError::Io(_))));
    }
}
