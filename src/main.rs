//! Magpie main entry point
//!
//! This is the command-line interface for the Magpie document ingestion
//! service.

use anyhow::Context;
use clap::Parser;
use magpie::config::load_config;
use magpie::crawler::crawl;
use magpie::output::JsonlSink;
use magpie::Source;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Magpie: a document ingestion and corpus-export service
///
/// Magpie normalizes heterogeneous sources (JSON APIs, crawled websites,
/// uploaded files) into a shared document schema and exports them as
/// JSON Lines corpus files.
#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(version = "1.0.0")]
#[command(about = "A document ingestion and corpus-export service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a one-shot crawl of the given seed URL instead of serving
    #[arg(long, value_name = "URL")]
    crawl: Option<String>,

    /// Page budget for --crawl (defaults to the configured value)
    #[arg(long, requires = "crawl")]
    max_pages: Option<usize>,

    /// Directory for the --crawl corpus file (defaults to the current directory)
    #[arg(long, requires = "crawl")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if let Some(seed_url) = cli.crawl.as_deref() {
        handle_crawl(&config, seed_url, cli.max_pages, cli.output.as_deref()).await
    } else {
        handle_serve(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("magpie=info,warn"),
            1 => EnvFilter::new("magpie=debug,info"),
            2 => EnvFilter::new("magpie=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --crawl mode: one-shot crawl, corpus written locally
async fn handle_crawl(
    config: &magpie::Config,
    seed_url: &str,
    max_pages: Option<usize>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let max_pages = max_pages.unwrap_or(config.crawler.default_max_pages);
    let documents = crawl(&config.crawler, seed_url, max_pages).await?;

    let sink = JsonlSink::new(&config.output);
    let corpus = sink.write(&documents, Source::Web)?;
    let path = corpus.persist(output.unwrap_or(Path::new(".")))?;

    println!(
        "✓ Wrote {} documents to {}",
        documents.len(),
        path.display()
    );

    Ok(())
}

/// Handles the default mode: serve the HTTP collection API
async fn handle_serve(config: magpie::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting HTTP server on {}:{}",
        config.server.host,
        config.server.port
    );

    magpie::server::serve(config).await?;
    Ok(())
}
