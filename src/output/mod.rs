//! Corpus output handling
//!
//! Documents are exported as JSON Lines: one compact JSON object per
//! line, written to a transient file handed back to the caller together
//! with a generated download filename.

mod jsonl;

pub use jsonl::{corpus_filename, write_jsonl, CorpusFile, JsonlSink, OutputError};
