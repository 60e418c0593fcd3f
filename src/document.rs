//! The shared document record produced by every ingestion path.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Origin tag for a document. Serialized in lowercase, matching the
/// source tags embedded in generated corpus filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Web,
    Api,
    File,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Web => write!(f, "web"),
            Source::Api => write!(f, "api"),
            Source::File => write!(f, "file"),
        }
    }
}

/// One normalized document record.
///
/// Every collector produces these, regardless of where the content came
/// from. `text` holds plain text only; markup never survives extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, generated fresh per document.
    pub id: String,

    /// Origin of the document.
    pub source: Source,

    /// The exact URL the content was extracted from. For uploaded files
    /// this carries the original filename.
    pub url: String,

    /// Best-effort title; collectors fall back to the URL or a
    /// positional label when the source has none.
    pub title: String,

    /// Extracted plain text.
    pub text: String,

    /// Language tag, carried through from sources that declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Capture timestamp at the moment of extraction.
    pub date: String,
}

impl Document {
    /// Builds a new document with a fresh id and the current timestamp.
    pub fn new(
        source: Source,
        url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source,
            url: url.into(),
            title: title.into(),
            text: text.into(),
            lang: None,
            date: Local::now().to_rfc3339(),
        }
    }

    /// Attaches an optional language tag.
    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang;
        self
    }
}
