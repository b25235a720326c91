//! Hand-off of chunks to an external vector store.
//!
//! Vector stores take parallel batches of texts and metadata; `ChunkBatch`
//! is that shape. `write_jsonl` streams one JSON document per line for
//! tools that ingest files instead.

use crate::types::{Document, Metadata};
use charter_core::AppResult;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Parallel texts and metadata, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkBatch {
    pub texts: Vec<String>,
    pub metadatas: Vec<Metadata>,
}

impl ChunkBatch {
    pub fn from_chunks(chunks: &[Document]) -> Self {
        let (texts, metadatas) = chunks
            .iter()
            .map(|c| (c.content.clone(), c.metadata.clone()))
            .unzip();
        Self { texts, metadatas }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl From<Vec<Document>> for ChunkBatch {
    fn from(chunks: Vec<Document>) -> Self {
        let (texts, metadatas) = chunks.into_iter().map(|c| (c.content, c.metadata)).unzip();
        Self { texts, metadatas }
    }
}

/// Write chunks as JSON Lines (`{"content": .., "metadata": {..}}`).
pub fn write_jsonl<W: Write>(chunks: &[Document], mut writer: W) -> AppResult<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
