//! Document processing: load, split and annotate charter files.

use crate::config::ProcessorConfig;
use crate::loader::{extension_of, LoaderRegistry};
use crate::progress::ProgressReporter;
use crate::splitter::RecursiveCharacterSplitter;
use crate::stats::{self, Stats};
use crate::types::{keys, Document, Metadata};
use charter_core::config::normalize_extensions;
use charter_core::{AppError, AppResult, SUPPORTED_EXTENSIONS};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that failed during a directory run.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Per-file chunk count for a directory run.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub chunks: usize,
}

/// Outcome of a directory run: every chunk plus what happened per file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryReport {
    pub chunks: Vec<Document>,
    pub processed: Vec<FileSummary>,
    pub failures: Vec<FileFailure>,
}

impl DirectoryReport {
    pub fn files_seen(&self) -> usize {
        self.processed.len() + self.failures.len()
    }
}

/// Turns charter files into annotated, size-bounded chunks.
///
/// Holds only immutable settings, so one processor can be shared across
/// threads and reused for any number of files.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    splitter: RecursiveCharacterSplitter,
    registry: LoaderRegistry,
    progress: ProgressReporter,
}

impl DocumentProcessor {
    /// Build a processor, rejecting invalid chunk settings before any file
    /// is touched.
    pub fn new(config: ProcessorConfig) -> AppResult<Self> {
        let splitter = RecursiveCharacterSplitter::new(&config)?;

        tracing::debug!(
            "Document processor ready (chunk_size: {}, chunk_overlap: {})",
            config.chunk_size,
            config.chunk_overlap
        );

        Ok(Self {
            splitter,
            registry: LoaderRegistry::default(),
            progress: ProgressReporter::noop(),
        })
    }

    pub fn with_registry(mut self, registry: LoaderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Load a file into raw documents: one per page for PDF, one per file
    /// otherwise. Each carries `source`; PDF pages also carry `page` and
    /// `total_pages`.
    pub fn load_document(&self, path: impl AsRef<Path>) -> AppResult<Vec<Document>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AppError::NotFound(path.to_path_buf()));
        }

        let loader = self.registry.loader_for(path).ok_or_else(|| {
            AppError::unsupported_format(extension_of(path), self.registry.extensions())
        })?;

        tracing::debug!("Loading {:?} with {} loader", path, loader.name());

        let pages = loader.load(path).map_err(|e| AppError::load(path, e))?;

        let total_pages = pages.iter().filter(|p| p.page.is_some()).count();
        let source = path.display().to_string();

        let documents = pages
            .into_iter()
            .map(|page| {
                let mut metadata = Metadata::new();
                metadata.insert(keys::SOURCE.into(), json!(source));
                if let Some(number) = page.page {
                    metadata.insert(keys::PAGE.into(), json!(number));
                    metadata.insert(keys::TOTAL_PAGES.into(), json!(total_pages));
                }
                Document::new(page.text, metadata)
            })
            .collect::<Vec<_>>();

        tracing::debug!("Loaded {} documents from {:?}", documents.len(), path);

        Ok(documents)
    }

    /// Split documents into chunks. Every chunk inherits a copy of its
    /// document's metadata; input order is preserved.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Document> {
        let chunks: Vec<Document> = documents
            .iter()
            .flat_map(|doc| {
                self.splitter
                    .split_text(&doc.content)
                    .into_iter()
                    .map(move |span| Document::new(span.content, doc.metadata.clone()))
            })
            .collect();

        tracing::debug!(
            "Split {} documents into {} chunks",
            documents.len(),
            chunks.len()
        );

        chunks
    }

    /// Load, split and annotate one file.
    ///
    /// Chunks get `chunk_id` (0-based, file order), `source_file` (the
    /// basename), `total_chunks` and `page` (null for unpaginated formats).
    pub fn process_file(&self, path: impl AsRef<Path>) -> AppResult<Vec<Document>> {
        let path = path.as_ref();

        let documents = self.load_document(path)?;
        let mut chunks = self.chunk_documents(&documents);

        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let total = chunks.len();

        for (id, chunk) in chunks.iter_mut().enumerate() {
            let metadata = &mut chunk.metadata;
            metadata.insert(keys::CHUNK_ID.into(), json!(id));
            metadata.insert(keys::SOURCE_FILE.into(), json!(source_file));
            metadata.insert(keys::TOTAL_CHUNKS.into(), json!(total));
            metadata.entry(keys::PAGE).or_insert(Value::Null);
        }

        tracing::info!("Processed {}: {} chunks", source_file, total);

        Ok(chunks)
    }

    /// Process every matching file under `dir`, recursively.
    ///
    /// Files that fail are logged and skipped. `extensions` defaults to
    /// the supported set and is matched case-insensitively.
    pub fn process_directory(
        &self,
        dir: impl AsRef<Path>,
        extensions: Option<&[String]>,
    ) -> AppResult<Vec<Document>> {
        Ok(self.process_directory_report(dir, extensions)?.chunks)
    }

    /// Like `process_directory`, but also reports per-file outcomes.
    pub fn process_directory_report(
        &self,
        dir: impl AsRef<Path>,
        extensions: Option<&[String]>,
    ) -> AppResult<DirectoryReport> {
        let dir = dir.as_ref();

        if !dir.exists() {
            return Err(AppError::DirectoryNotFound(dir.to_path_buf()));
        }

        if !dir.is_dir() {
            tracing::warn!("{:?} is not a directory, nothing to process", dir);
            return Ok(DirectoryReport::default());
        }

        let extensions = match extensions {
            Some(list) => normalize_extensions(list),
            None => SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };

        let files = discover_files(dir, &extensions);
        let total = files.len();

        tracing::info!("Found {} matching files in {:?}", total, dir);
        self.progress.discover(dir, total);

        let mut report = DirectoryReport::default();

        for (index, path) in files.into_iter().enumerate() {
            let current = index + 1;
            self.progress.parse(current, total, &path);

            match self.process_file(&path) {
                Ok(chunks) => {
                    tracing::info!("Processed: {:?} ({} chunks)", path, chunks.len());
                    self.progress.chunk(current, total, &path, chunks.len());
                    report.processed.push(FileSummary {
                        path,
                        chunks: chunks.len(),
                    });
                    report.chunks.extend(chunks);
                }
                Err(e) => {
                    tracing::error!("Error processing {:?}: {}", path, e);
                    self.progress.skip(current, total, &path, &e.to_string());
                    report.failures.push(FileFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Directory run finished: {} files processed, {} failed, {} chunks",
            report.processed.len(),
            report.failures.len(),
            report.chunks.len()
        );

        Ok(report)
    }

    /// Summary statistics over a chunk sequence.
    pub fn get_stats(&self, chunks: &[Document]) -> Stats {
        stats::get_stats(chunks)
    }
}

/// Regular files under `dir` whose extension is in `extensions`, in a
/// stable (name-sorted) order.
fn discover_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.is_file())
        .filter(|path| extensions.contains(&extension_of(path)))
        .collect()
}
