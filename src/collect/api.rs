//! JSON API ingestion
//!
//! Fetches an external API endpoint and converts the payload into
//! documents. Arrays become one document per object element; wrapper
//! objects are unwrapped through their `items`/`results`/`articles`
//! keys; anything else becomes a single document. Non-JSON bodies are
//! kept verbatim as one raw-text document.

use crate::collect::{positional_title, pretty, string_field};
use crate::config::ApiConfig;
use crate::crawler::build_http_client;
use crate::document::{Document, Source};
use crate::MagpieError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Keys under which APIs commonly nest their result arrays, tried in
/// order.
const LIST_KEYS: &[&str] = &["items", "results", "articles"];

/// Collector for JSON API endpoints.
pub struct ApiCollector {
    client: Client,
}

impl ApiCollector {
    pub fn new(config: &ApiConfig, user_agent: &str) -> Result<Self, MagpieError> {
        let client = build_http_client(user_agent, Duration::from_secs(config.timeout_secs))?;
        Ok(Self { client })
    }

    /// Fetches `url` and converts the response into at most `limit`
    /// documents.
    ///
    /// Any request failure (transport error or non-2xx status) is a
    /// client-facing [`MagpieError::ApiRequest`]; a payload that yields
    /// no documents is [`MagpieError::EmptyApiResponse`].
    pub async fn collect(&self, url: &str, limit: usize) -> Result<Vec<Document>, MagpieError> {
        let api_error = |source| MagpieError::ApiRequest {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(api_error)?;
        let response = response.error_for_status().map_err(api_error)?;
        let body = response.text().await.map_err(api_error)?;

        let documents = match serde_json::from_str::<Value>(&body) {
            Ok(data) => documents_from_json(&data, url, limit),
            Err(_) => vec![Document::new(Source::Api, url, "API Response", body)],
        };

        if documents.is_empty() {
            return Err(MagpieError::EmptyApiResponse);
        }

        tracing::info!("Collected {} documents from {}", documents.len(), url);
        Ok(documents)
    }
}

/// Converts a parsed JSON payload into documents.
fn documents_from_json(data: &Value, url: &str, limit: usize) -> Vec<Document> {
    match data {
        Value::Array(items) => collect_items(items, url, limit, &["title"], &["lang"]),

        Value::Object(map) => {
            if LIST_KEYS.iter().any(|k| map.contains_key(*k)) {
                // First nested key holding a non-empty array wins.
                let items = LIST_KEYS
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_array).filter(|a| !a.is_empty()));
                match items {
                    Some(items) => {
                        collect_items(items, url, limit, &["title", "name"], &["language", "lang"])
                    }
                    None => Vec::new(),
                }
            } else {
                let title = string_field(map, &["title"])
                    .unwrap_or_else(|| "API Response".to_string());
                let lang = string_field(map, &["lang"]);
                vec![Document::new(Source::Api, url, title, pretty(data)).with_lang(lang)]
            }
        }

        Value::String(s) => vec![Document::new(Source::Api, url, "API Response", s.clone())],

        other => vec![Document::new(Source::Api, url, "API Response", other.to_string())],
    }
}

/// One document per object element, capped at `limit`; non-object
/// elements are skipped but still count against the cap.
fn collect_items(
    items: &[Value],
    url: &str,
    limit: usize,
    title_keys: &[&str],
    lang_keys: &[&str],
) -> Vec<Document> {
    items
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, item)| {
            let map = item.as_object()?;
            let title = string_field(map, title_keys).unwrap_or_else(|| positional_title(i));
            let lang = string_field(map, lang_keys);
            Some(Document::new(Source::Api, url, title, pretty(item)).with_lang(lang))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URL: &str = "https://api.example.com/posts";

    #[test]
    fn test_array_payload_caps_at_limit() {
        let data = json!([
            {"title": "one", "body": "a"},
            {"title": "two", "body": "b"},
            {"title": "three", "body": "c"},
        ]);
        let docs = documents_from_json(&data, URL, 2);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "one");
        assert_eq!(docs[1].title, "two");
        assert_eq!(docs[0].source, Source::Api);
        assert_eq!(docs[0].url, URL);
    }

    #[test]
    fn test_array_items_without_title_get_positional_titles() {
        let data = json!([{"body": "a"}, {"body": "b"}]);
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs[0].title, "Document 1");
        assert_eq!(docs[1].title, "Document 2");
    }

    #[test]
    fn test_non_object_array_elements_skipped() {
        let data = json!([{"title": "one"}, 42, "plain"]);
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_wrapped_results_key() {
        let data = json!({"results": [{"name": "first"}, {"name": "second"}]});
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "first");
    }

    #[test]
    fn test_wrapper_with_empty_list_yields_nothing() {
        let data = json!({"items": []});
        let docs = documents_from_json(&data, URL, 10);
        assert!(docs.is_empty());
    }

    #[test]
    fn test_plain_object_becomes_single_document() {
        let data = json!({"title": "Solo", "body": "text"});
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Solo");
        assert!(docs[0].text.contains("\"body\""));
    }

    #[test]
    fn test_lang_carried_through() {
        let data = json!([{"title": "t", "lang": "en"}]);
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs[0].lang.as_deref(), Some("en"));
    }

    #[test]
    fn test_string_scalar_kept_unquoted() {
        let data = json!("just text");
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs[0].text, "just text");
    }

    #[test]
    fn test_number_scalar() {
        let data = json!(42);
        let docs = documents_from_json(&data, URL, 10);
        assert_eq!(docs[0].text, "42");
    }

    #[tokio::test]
    async fn test_collect_json_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"title": "a"}, {"title": "b"}])),
            )
            .mount(&server)
            .await;

        let collector = ApiCollector::new(&ApiConfig::default(), "TestAgent/1.0").unwrap();
        let docs = collector
            .collect(&format!("{}/posts", server.uri()), 50)
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_collect_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain response"))
            .mount(&server)
            .await;

        let collector = ApiCollector::new(&ApiConfig::default(), "TestAgent/1.0").unwrap();
        let docs = collector
            .collect(&format!("{}/raw", server.uri()), 50)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "plain response");
    }

    #[tokio::test]
    async fn test_request_failure_is_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let collector = ApiCollector::new(&ApiConfig::default(), "TestAgent/1.0").unwrap();
        let err = collector
            .collect(&format!("{}/posts", server.uri()), 50)
            .await
            .unwrap_err();
        assert!(matches!(err, MagpieError::ApiRequest { .. }));
        assert!(err.is_client_error());
    }
}
