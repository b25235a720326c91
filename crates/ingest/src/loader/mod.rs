//! Format loaders.
//!
//! Each loader turns a file on disk into page texts. The processor picks a
//! loader by extension through the `LoaderRegistry`; supporting another
//! format means implementing `DocumentLoader` and registering it.

mod docx;
mod pdf;
mod text;

pub use docx::DocxLoader;
pub use pdf::PdfLoader;
pub use text::TextLoader;

#[cfg(test)]
pub(crate) use docx::fixtures as docx_fixtures;
#[cfg(test)]
pub(crate) use pdf::fixtures as pdf_fixtures;

use crate::types::PageText;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Failure inside a format loader. Wrapped into `AppError::Load` together
/// with the path by the processor.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to parse PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to parse DOCX: {0}")]
    Docx(#[from] docx_rs::ReaderError),
}

/// Capability shared by all format loaders.
pub trait DocumentLoader: Send + Sync {
    /// Short loader name for logs.
    fn name(&self) -> &'static str;

    /// Lowercase extensions (with leading dot) this loader handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Extract page texts. File handles are closed before returning.
    fn load(&self, path: &Path) -> Result<Vec<PageText>, LoaderError>;
}

/// Lowercase extension of a path with its leading dot, or `""` when absent.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Extension → loader lookup table.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn DocumentLoader>>,
    /// Extensions in first-registration order
    order: Vec<String>,
}

impl LoaderRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a loader for every extension it declares, replacing any
    /// loader previously registered for them.
    pub fn register(&mut self, loader: Arc<dyn DocumentLoader>) -> &mut Self {
        for ext in loader.extensions() {
            let ext = ext.to_lowercase();
            if self.loaders.insert(ext.clone(), Arc::clone(&loader)).is_none() {
                self.order.push(ext);
            }
        }
        self
    }

    /// Loader for a path's extension (case-insensitive).
    pub fn loader_for(&self, path: &Path) -> Option<Arc<dyn DocumentLoader>> {
        self.loaders.get(&extension_of(path)).cloned()
    }

    /// Registered extensions, in the order they were first registered.
    pub fn extensions(&self) -> &[String] {
        &self.order
    }
}

impl Default for LoaderRegistry {
    /// PDF, TXT and DOCX/DOC loaders.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Arc::new(PdfLoader))
            .register(Arc::new(TextLoader))
            .register(Arc::new(DocxLoader));
        registry
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MarkdownLoader;

    impl DocumentLoader for MarkdownLoader {
        fn name(&self) -> &'static str {
            "markdown"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".md"]
        }

        fn load(&self, path: &Path) -> Result<Vec<PageText>, LoaderError> {
            Ok(vec![PageText::whole(std::fs::read_to_string(path)?)])
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("chp.PDF")), ".pdf");
        assert_eq!(extension_of(Path::new("dir/mhp.Docx")), ".docx");
        assert_eq!(extension_of(Path::new("README")), "");
    }

    #[test]
    fn test_default_registry() {
        let registry = LoaderRegistry::default();
        assert_eq!(registry.extensions(), [".pdf", ".txt", ".docx", ".doc"]);
        assert_eq!(registry.loader_for(Path::new("a.PDF")).unwrap().name(), "pdf");
        assert_eq!(registry.loader_for(Path::new("a.doc")).unwrap().name(), "docx");
        assert!(registry.loader_for(Path::new("a.xlsx")).is_none());
    }

    #[test]
    fn test_register_new_format() {
        let mut registry = LoaderRegistry::default();
        registry.register(Arc::new(MarkdownLoader));
        assert_eq!(registry.loader_for(Path::new("notes.md")).unwrap().name(), "markdown");
        assert_eq!(registry.extensions().last().map(String::as_str), Some(".md"));

        // Re-registering keeps the original position.
        registry.register(Arc::new(TextLoader));
        assert_eq!(registry.extensions()[1], ".txt");
        assert_eq!(registry.extensions().len(), 5);
    }
}
