//! Thin HTTP layer over the collectors
//!
//! Routes:
//! - `POST /collect/web`  - crawl a site from a seed URL
//! - `POST /collect/api`  - ingest a JSON API endpoint
//! - `POST /collect/file` - ingest an uploaded file
//! - `GET  /health`       - liveness probe

mod error;
mod handlers;

pub use error::AppError;

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Builds the application router.
pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/collect/web", post(handlers::collect_web))
        .route("/collect/api", post(handlers::collect_api))
        .route("/collect/file", post(handlers::collect_file))
        .with_state(AppState { config })
}

/// Binds the configured address and serves until shutdown.
pub async fn serve(config: Config) -> crate::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router(Arc::new(config))).await?;

    Ok(())
}
