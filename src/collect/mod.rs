//! Format-dispatch converters for the non-crawler ingestion paths
//!
//! The API and file collectors normalize whatever they are handed into
//! the same document schema the crawler produces. Their branching is
//! format dispatch only; all traversal logic lives in the crawler.

mod api;
mod file;

pub use api::ApiCollector;
pub use file::collect_file;

use serde_json::{Map, Value};

/// First string value found under any of `keys`, if present.
pub(crate) fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str).map(str::to_string))
}

/// Pretty-printed JSON used as document text for structured items.
pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Shared positional title fallback: `Document 1`, `Document 2`, ...
pub(crate) fn positional_title(index: usize) -> String {
    format!("Document {}", index + 1)
}
