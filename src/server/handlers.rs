//! Request handlers for the collection endpoints
//!
//! Each collect handler validates its parameters, runs the matching
//! collector, and returns the sink's corpus file as an attachment.

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::collect::{self, ApiCollector};
use crate::crawler::Crawler;
use crate::document::{Document, Source};
use crate::output::JsonlSink;
use crate::server::{error::AppError, AppState};
use crate::MagpieError;

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
pub struct WebParams {
    url: String,
    max_pages: Option<usize>,
}

/// `POST /collect/web` - crawl a site breadth-first from a seed URL and
/// return the extracted documents as a JSONL attachment.
pub async fn collect_web(
    State(state): State<AppState>,
    Query(params): Query<WebParams>,
) -> Result<Response, AppError> {
    let config = &state.config;

    let max_pages = params.max_pages.unwrap_or(config.crawler.default_max_pages);
    if max_pages < 1 || max_pages > config.crawler.max_pages_limit {
        return Err(invalid_parameter(
            "max_pages",
            format!("must be between 1 and {}", config.crawler.max_pages_limit),
        ));
    }
    validate_url(&params.url)?;

    let crawler = Crawler::new(&config.crawler)?;
    let documents = crawler.crawl(&params.url, max_pages).await?;

    corpus_response(&state, &documents, Source::Web).await
}

#[derive(Debug, Deserialize)]
pub struct ApiParams {
    url: String,
    limit: Option<usize>,
}

/// `POST /collect/api` - fetch a JSON API endpoint and return its items
/// as a JSONL attachment.
pub async fn collect_api(
    State(state): State<AppState>,
    Query(params): Query<ApiParams>,
) -> Result<Response, AppError> {
    let config = &state.config;

    let limit = params.limit.unwrap_or(config.api.default_limit);
    if limit < 1 {
        return Err(invalid_parameter("limit", "must be >= 1".to_string()));
    }
    validate_url(&params.url)?;

    let collector = ApiCollector::new(&config.api, &config.crawler.user_agent)?;
    let documents = collector.collect(&params.url, limit).await?;

    corpus_response(&state, &documents, Source::Api).await
}

#[derive(Debug, Deserialize)]
pub struct FileParams {
    max_documents: Option<usize>,
}

/// `POST /collect/file` - convert an uploaded file (multipart field
/// `file`) into documents and return them as a JSONL attachment.
pub async fn collect_file(
    State(state): State<AppState>,
    Query(params): Query<FileParams>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let config = &state.config;

    let max_documents = params
        .max_documents
        .unwrap_or(config.file.default_max_documents);
    if max_documents < 1 || max_documents > config.file.max_documents_limit {
        return Err(invalid_parameter(
            "max_documents",
            format!("must be between 1 and {}", config.file.max_documents_limit),
        ));
    }

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_parameter("file", e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| invalid_parameter("file", e.to_string()))?;
            upload = Some((filename, data));
        }
    }

    let Some((filename, data)) = upload else {
        return Err(invalid_parameter(
            "file",
            "missing multipart field".to_string(),
        ));
    };

    let content = String::from_utf8_lossy(&data);
    let documents = collect::collect_file(&content, &filename, max_documents)?;

    corpus_response(&state, &documents, Source::File).await
}

/// Writes the documents through the sink and builds the file-download
/// response. The backing temp file is gone once the response is built.
async fn corpus_response(
    state: &AppState,
    documents: &[Document],
    source: Source,
) -> Result<Response, AppError> {
    let sink = JsonlSink::new(&state.config.output);
    let corpus = sink.write(documents, source)?;
    let bytes = tokio::fs::read(corpus.path()).await.map_err(MagpieError::Io)?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", corpus.filename()),
        ),
    ];

    Ok((headers, bytes).into_response())
}

fn invalid_parameter(name: &'static str, message: String) -> AppError {
    MagpieError::InvalidParameter { name, message }.into()
}

/// Seeds and endpoints must be absolute http(s) URLs.
fn validate_url(raw: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| invalid_parameter("url", e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid_parameter(
            "url",
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(())
}
