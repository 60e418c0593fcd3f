use serde::Deserialize;

/// Main configuration structure for Magpie
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
    pub api: ApiConfig,
    pub file: FileConfig,
    pub output: OutputConfig,
}

/// HTTP server bind address
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Web crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Page budget used when a request does not specify one
    pub default_max_pages: usize,

    /// Upper bound accepted for a per-request page budget
    pub max_pages_limit: usize,

    /// Per-request fetch timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every page fetch
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_max_pages: 5,
            max_pages_limit: 2000,
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// API ingestion configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApiConfig {
    /// Document cap used when a request does not specify one
    pub default_limit: usize,

    /// Timeout for API endpoint requests in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            timeout_secs: 30,
        }
    }
}

/// File ingestion configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Document cap used when a request does not specify one
    pub default_max_documents: usize,

    /// Upper bound accepted for a per-request document cap
    pub max_documents_limit: usize,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_max_documents: 100,
            max_documents_limit: 1000,
        }
    }
}

/// Corpus output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Prefix for generated corpus filenames
    /// (`<prefix>_<source>_<timestamp>.jsonl`)
    pub filename_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "corpus".to_string(),
        }
    }
}
