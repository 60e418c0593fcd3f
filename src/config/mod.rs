//! Configuration loading and validation
//!
//! Configuration is read from a TOML file. Every section has sensible
//! defaults, so a minimal (even empty) file is valid.

pub mod parser;
pub mod types;
pub mod validation;

pub use parser::load_config;
pub use types::{ApiConfig, Config, CrawlerConfig, FileConfig, OutputConfig, ServerConfig};
pub use validation::validate;
