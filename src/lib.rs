//! Magpie: a document ingestion and corpus-export service
//!
//! This crate pulls documents out of heterogeneous sources (a JSON API
//! endpoint, a website reached by link-following, or an uploaded file) and
//! normalizes them into a shared record shape, exported as JSON Lines.

pub mod collect;
pub mod config;
pub mod crawler;
pub mod document;
pub mod output;
pub mod server;

use thiserror::Error;

/// Main error type for Magpie operations
#[derive(Debug, Error)]
pub enum MagpieError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("no text could be extracted from any page")]
    NoContentExtracted,

    #[error("no documents could be built from the API response")]
    EmptyApiResponse,

    #[error("API request to {url} failed: {source}")]
    ApiRequest { url: String, source: reqwest::Error },

    #[error("invalid JSON in {filename}: {source}")]
    InvalidJson {
        filename: String,
        source: serde_json::Error,
    },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MagpieError {
    /// Whether this failure was caused by the request rather than by the
    /// service itself. Client errors map to a 400 at the HTTP boundary;
    /// everything else is a server fault reported with full detail.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MagpieError::NoContentExtracted
                | MagpieError::EmptyApiResponse
                | MagpieError::ApiRequest { .. }
                | MagpieError::InvalidJson { .. }
                | MagpieError::InvalidParameter { .. }
        )
    }
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

/// Result type alias for Magpie operations
pub type Result<T> = std::result::Result<T, MagpieError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use document::{Document, Source};
