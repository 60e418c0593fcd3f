use crate::config::types::{ApiConfig, Config, CrawlerConfig, FileConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_api_config(&config.api)?;
    validate_file_config(&config.file)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-limit must be >= 1, got {}",
            config.max_pages_limit
        )));
    }

    if config.default_max_pages < 1 || config.default_max_pages > config.max_pages_limit {
        return Err(ConfigError::Validation(format!(
            "default-max-pages must be between 1 and {}, got {}",
            config.max_pages_limit, config.default_max_pages
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates API ingestion configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if config.default_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "default-limit must be >= 1, got {}",
            config.default_limit
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates file ingestion configuration
fn validate_file_config(config: &FileConfig) -> Result<(), ConfigError> {
    if config.max_documents_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "max-documents-limit must be >= 1, got {}",
            config.max_documents_limit
        )));
    }

    if config.default_max_documents < 1
        || config.default_max_documents > config.max_documents_limit
    {
        return Err(ConfigError::Validation(format!(
            "default-max-documents must be between 1 and {}, got {}",
            config.max_documents_limit, config.default_max_documents
        )));
    }

    Ok(())
}

/// Validates corpus output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.filename_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "filename-prefix cannot be empty".to_string(),
        ));
    }

    // The prefix lands in a Content-Disposition filename; keep it to
    // characters that survive that header unquoted.
    if !config
        .filename_prefix
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "filename-prefix must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.filename_prefix
        )));
    }

    Ok(())
}
