//! Document and chunk type definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata attached to a document: string keys, scalar JSON values.
pub type Metadata = serde_json::Map<String, Value>;

/// Well-known metadata keys.
pub mod keys {
    /// Path the document was loaded from, as given by the caller
    pub const SOURCE: &str = "source";
    /// Page number (1-based) or null for non-paginated formats
    pub const PAGE: &str = "page";
    /// Number of pages in the originating PDF
    pub const TOTAL_PAGES: &str = "total_pages";
    /// 0-based chunk ordinal within its source file
    pub const CHUNK_ID: &str = "chunk_id";
    /// Basename of the source file
    pub const SOURCE_FILE: &str = "source_file";
    /// Number of chunks produced from the source file
    pub const TOTAL_CHUNKS: &str = "total_chunks";
}

/// One unit of text plus its provenance.
///
/// Loaders produce one `Document` per page (PDF) or per file; the splitter
/// produces one per chunk, inheriting and extending the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Text content
    pub content: String,

    /// Provenance metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Content length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn chunk_id(&self) -> Option<u64> {
        self.metadata.get(keys::CHUNK_ID).and_then(Value::as_u64)
    }

    pub fn total_chunks(&self) -> Option<u64> {
        self.metadata.get(keys::TOTAL_CHUNKS).and_then(Value::as_u64)
    }

    pub fn source_file(&self) -> Option<&str> {
        self.metadata.get(keys::SOURCE_FILE).and_then(Value::as_str)
    }

    /// Page number, `None` when absent or null.
    pub fn page(&self) -> Option<u64> {
        self.metadata.get(keys::PAGE).and_then(Value::as_u64)
    }
}

/// Raw text of one page as returned by a format loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub text: String,
    /// 1-based page number, `None` for formats without pages
    pub page: Option<u32>,
}

impl PageText {
    /// A whole-file text with no page information.
    pub fn whole(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: None,
        }
    }

    pub fn page(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page: Some(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let mut metadata = Metadata::new();
        metadata.insert(keys::CHUNK_ID.into(), json!(2));
        metadata.insert(keys::TOTAL_CHUNKS.into(), json!(5));
        metadata.insert(keys::SOURCE_FILE.into(), json!("akp.txt"));
        metadata.insert(keys::PAGE.into(), Value::Null);

        let doc = Document::new("Genel Başkan", metadata);
        assert_eq!(doc.chunk_id(), Some(2));
        assert_eq!(doc.total_chunks(), Some(5));
        assert_eq!(doc.source_file(), Some("akp.txt"));
        assert_eq!(doc.page(), None);
    }

    #[test]
    fn test_char_len_counts_characters_not_bytes() {
        let doc = Document::new("ışğüöçİ", Metadata::new());
        assert_eq!(doc.char_len(), 7);
        assert!(doc.content.len() > 7);
    }
}
