//! Aggregate statistics over processed chunks.

use crate::types::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Source name used for chunks that carry no `source_file` key.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Read-only summary of a chunk sequence. All zero for empty input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_chunks: usize,

    /// Mean content length in characters
    pub avg_chunk_length: f64,

    pub min_chunk_length: usize,

    pub max_chunk_length: usize,

    pub unique_sources: usize,

    /// Distinct source files, sorted
    pub sources: Vec<String>,
}

/// Compute statistics for a sequence of chunks.
pub fn get_stats(chunks: &[Document]) -> Stats {
    if chunks.is_empty() {
        return Stats::default();
    }

    let lengths: Vec<usize> = chunks.iter().map(Document::char_len).collect();
    let sources: BTreeSet<String> = chunks
        .iter()
        .map(|c| c.source_file().unwrap_or(UNKNOWN_SOURCE).to_string())
        .collect();

    Stats {
        total_chunks: chunks.len(),
        avg_chunk_length: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
        min_chunk_length: lengths.iter().copied().min().unwrap_or(0),
        max_chunk_length: lengths.iter().copied().max().unwrap_or(0),
        unique_sources: sources.len(),
        sources: sources.into_iter().collect(),
    }
}
