use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use magpie::config::load_config;
///
/// let config = load_config(Path::new("magpie.toml")).unwrap();
/// println!("Default page budget: {}", config.crawler.default_max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[server]
host = "127.0.0.1"
port = 9000

[crawler]
default-max-pages = 10
max-pages-limit = 500
timeout-secs = 5
user-agent = "TestAgent/1.0"

[output]
filename-prefix = "dataset"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.crawler.default_max_pages, 10);
        assert_eq!(config.crawler.max_pages_limit, 500);
        assert_eq!(config.crawler.user_agent, "TestAgent/1.0");
        assert_eq!(config.output.filename_prefix, "dataset");
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.crawler.default_max_pages, 5);
        assert_eq!(config.crawler.max_pages_limit, 2000);
        assert_eq!(config.crawler.timeout_secs, 10);
        assert_eq!(config.api.default_limit, 50);
        assert_eq!(config.file.default_max_documents, 100);
        assert_eq!(config.output.filename_prefix, "corpus");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/magpie.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
default-max-pages = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
