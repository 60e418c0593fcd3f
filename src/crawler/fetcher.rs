//! HTTP fetcher implementation
//!
//! This module handles page fetching for the crawler: building HTTP
//! clients with the configured user agent and timeout, and classifying
//! fetch failures. A `FetchError` is always a per-page condition; the
//! crawl engine logs it and moves on.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Per-page fetch failure. Recovered locally by the crawl engine; never
/// crosses the crawl boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Builds an HTTP client with the given user agent and request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use magpie::crawler::build_http_client;
///
/// let client = build_http_client("Mozilla/5.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, treating any non-success status or transport
/// error uniformly as a classified page failure.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))
}

fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("TestAgent/1.0", Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client("TestAgent/1.0", Duration::from_secs(5)).unwrap();
        let result = fetch_page(&client, &format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let client = build_http_client("TestAgent/1.0", Duration::from_secs(5)).unwrap();
        let body = fetch_page(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_connection_failure_classified() {
        // Port 1 is essentially never listening.
        let client = build_http_client("TestAgent/1.0", Duration::from_secs(2)).unwrap();
        let result = fetch_page(&client, "http://127.0.0.1:1/").await;
        assert!(matches!(
            result,
            Err(FetchError::Connect(_)) | Err(FetchError::Request(_)) | Err(FetchError::Timeout)
        ));
    }
}
