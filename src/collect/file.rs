//! Uploaded-file ingestion
//!
//! Converts an uploaded file into documents based on its extension:
//! txt and unknown extensions are kept as one plain-text document, json
//! and jsonl are unpacked per item, csv becomes one document per row.
//! The document `url` field carries the original filename.

use crate::collect::{positional_title, pretty, string_field};
use crate::document::{Document, Source};
use crate::MagpieError;
use serde_json::Value;

/// Converts file content into at most `max_documents` documents.
///
/// Only a `.json` file that fails to parse is an error
/// ([`MagpieError::InvalidJson`], client-facing); every other format
/// degrades to plain-text documents instead of failing.
pub fn collect_file(
    content: &str,
    filename: &str,
    max_documents: usize,
) -> Result<Vec<Document>, MagpieError> {
    let lower = filename.to_lowercase();

    let documents = if lower.ends_with(".txt") {
        vec![text_document(content, filename)]
    } else if lower.ends_with(".json") {
        json_documents(content, filename, max_documents)?
    } else if lower.ends_with(".jsonl") {
        jsonl_documents(content, filename, max_documents)
    } else if lower.ends_with(".csv") {
        csv_documents(content, filename, max_documents)
    } else {
        vec![text_document(content, filename)]
    };

    tracing::info!(
        "Collected {} documents from uploaded file {}",
        documents.len(),
        filename
    );
    Ok(documents)
}

fn text_document(content: &str, filename: &str) -> Document {
    Document::new(Source::File, filename, filename, content)
}

fn json_documents(
    content: &str,
    filename: &str,
    max_documents: usize,
) -> Result<Vec<Document>, MagpieError> {
    let data: Value = serde_json::from_str(content).map_err(|source| MagpieError::InvalidJson {
        filename: filename.to_string(),
        source,
    })?;

    Ok(match &data {
        Value::Array(items) => items
            .iter()
            .take(max_documents)
            .enumerate()
            .filter_map(|(i, item)| {
                let map = item.as_object()?;
                let title = string_field(map, &["title"]).unwrap_or_else(|| positional_title(i));
                let lang = string_field(map, &["lang"]);
                Some(Document::new(Source::File, filename, title, pretty(item)).with_lang(lang))
            })
            .collect(),

        Value::Object(map) => {
            let title =
                string_field(map, &["title"]).unwrap_or_else(|| "JSON Document".to_string());
            let lang = string_field(map, &["lang"]);
            vec![Document::new(Source::File, filename, title, pretty(&data)).with_lang(lang)]
        }

        // A bare scalar carries nothing worth keeping as a document.
        _ => Vec::new(),
    })
}

fn jsonl_documents(content: &str, filename: &str, max_documents: usize) -> Vec<Document> {
    let mut documents = Vec::new();

    for (i, line) in content.trim().lines().take(max_documents).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(item) => {
                if let Some(map) = item.as_object() {
                    let title =
                        string_field(map, &["title"]).unwrap_or_else(|| positional_title(i));
                    let lang = string_field(map, &["lang"]);
                    documents.push(
                        Document::new(Source::File, filename, title, pretty(&item))
                            .with_lang(lang),
                    );
                }
            }
            // Lines that are not JSON are kept as plain text.
            Err(_) => documents.push(Document::new(
                Source::File,
                filename,
                format!("Line {}", i + 1),
                line,
            )),
        }
    }

    documents
}

fn csv_documents(content: &str, filename: &str, max_documents: usize) -> Vec<Document> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::debug!("Unreadable CSV header in {}: {}", filename, e);
            return Vec::new();
        }
    };

    let mut documents = Vec::new();
    for (i, result) in reader.records().enumerate() {
        if i >= max_documents {
            break;
        }

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping malformed CSV row {} in {}: {}", i + 1, filename, e);
                continue;
            }
        };

        let mut row = serde_json::Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), Value::String(field.to_string()));
        }

        documents.push(Document::new(
            Source::File,
            filename,
            format!("CSV row {}", i + 1),
            pretty(&Value::Object(row)),
        ));
    }

    documents
}
