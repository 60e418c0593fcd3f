use crate::config::OutputConfig;
use crate::document::{Document, Source};
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist output file: {0}")]
    Persist(String),
}

/// Builds the download filename for a corpus:
/// `<prefix>_<source>_<timestamp>.jsonl`.
pub fn corpus_filename(prefix: &str, source: Source) -> String {
    format!(
        "{}_{}_{}.jsonl",
        prefix,
        source,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Writes documents as JSON Lines: one compact object per line, in
/// document order.
pub fn write_jsonl<W: Write>(documents: &[Document], mut writer: W) -> Result<(), OutputError> {
    for document in documents {
        serde_json::to_writer(&mut writer, document)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// A written corpus: a transient file plus its generated download name.
///
/// The backing temp file is deleted on drop; callers that want to keep
/// the corpus use [`CorpusFile::persist`].
pub struct CorpusFile {
    file: NamedTempFile,
    filename: String,
}

impl CorpusFile {
    /// Path of the transient backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The generated download filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Moves the corpus into `dir` under its generated filename and
    /// returns the final path.
    pub fn persist(self, dir: &Path) -> Result<PathBuf, OutputError> {
        let target = dir.join(&self.filename);
        self.file
            .persist(&target)
            .map_err(|e| OutputError::Persist(e.to_string()))?;
        Ok(target)
    }
}

/// Sink that serializes document lists into transient JSONL files.
pub struct JsonlSink {
    prefix: String,
}

impl JsonlSink {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            prefix: config.filename_prefix.clone(),
        }
    }

    /// Writes the document list for `source` and returns the transient
    /// corpus file.
    pub fn write(&self, documents: &[Document], source: Source) -> Result<CorpusFile, OutputError> {
        let mut file = tempfile::Builder::new()
            .prefix("magpie-")
            .suffix(".jsonl")
            .tempfile()?;

        write_jsonl(documents, &mut file)?;
        file.flush()?;

        let filename = corpus_filename(&self.prefix, source);
        tracing::debug!(
            "Wrote {} documents to {} ({})",
            documents.len(),
            file.path().display(),
            filename
        );

        Ok(CorpusFile { file, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_documents() -> Vec<Document> {
        vec![
            Document::new(Source::Web, "https://example.com/a", "A", "first text"),
            Document::new(Source::Web, "https://example.com/b", "B", "second text"),
        ]
    }

    #[test]
    fn test_filename_shape() {
        let name = corpus_filename("corpus", Source::Web);
        assert!(name.starts_with("corpus_web_"));
        assert!(name.ends_with(".jsonl"));
        // corpus_web_YYYYMMDD_HHMMSS.jsonl
        assert_eq!(name.len(), "corpus_web_".len() + 15 + ".jsonl".len());
    }

    #[test]
    fn test_one_object_per_line_in_order() {
        let documents = sample_documents();
        let mut buf = Vec::new();
        write_jsonl(&documents, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Document = serde_json::from_str(lines[0]).unwrap();
        let second: Document = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first, documents[0]);
        assert_eq!(second, documents[1]);
    }

    #[test]
    fn test_empty_document_list_writes_empty_file() {
        let mut buf = Vec::new();
        write_jsonl(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_sink_write_and_persist() {
        let sink = JsonlSink::new(&OutputConfig::default());
        let corpus = sink.write(&sample_documents(), Source::Web).unwrap();
        assert!(corpus.filename().starts_with("corpus_web_"));

        let dir = tempfile::tempdir().unwrap();
        let path = corpus.persist(dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_transient_file_removed_on_drop() {
        let sink = JsonlSink::new(&OutputConfig::default());
        let corpus = sink.write(&sample_documents(), Source::Web).unwrap();
        let path = corpus.path().to_path_buf();
        assert!(path.exists());
        drop(corpus);
        assert!(!path.exists());
    }
}
