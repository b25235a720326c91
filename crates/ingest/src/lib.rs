//! Document ingestion for party charters.
//!
//! Loads PDF, TXT and DOCX files, splits them into overlapping chunks with
//! a recursive character splitter and annotates each chunk with its
//! provenance, ready for embedding into a vector store.

pub mod batch;
pub mod config;
pub mod loader;
pub mod processor;
pub mod progress;
pub mod splitter;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use batch::{write_jsonl, ChunkBatch};
pub use config::{ProcessorConfig, DEFAULT_SEPARATORS};
pub use loader::{DocumentLoader, LoaderError, LoaderRegistry};
pub use processor::{DirectoryReport, DocumentProcessor, FileFailure, FileSummary};
pub use progress::{Phase, ProgressCallback, ProgressEvent, ProgressReporter};
pub use splitter::{RecursiveCharacterSplitter, TextSpan};
pub use stats::{get_stats, Stats};
pub use types::{keys, Document, Metadata, PageText};
