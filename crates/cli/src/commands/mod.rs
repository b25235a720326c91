//! Command handlers for the charter CLI.
//!
//! This module organizes all CLI commands into separate submodules and
//! holds the shared "process a path" step both commands start from.

pub mod process;
pub mod stats;

// Re-export command types for convenience
pub use process::ProcessCommand;
pub use stats::StatsCommand;

use charter_core::{config::AppConfig, AppResult};
use charter_ingest::{
    DirectoryReport, DocumentProcessor, FileSummary, ProcessorConfig, ProgressReporter, Stats,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Build a processor from the resolved configuration. Verbose runs print
/// per-file progress to stderr.
pub fn build_processor(config: &AppConfig) -> AppResult<DocumentProcessor> {
    let processor = DocumentProcessor::new(ProcessorConfig::from(config))?;

    if config.verbose {
        Ok(processor.with_progress(ProgressReporter::new(Arc::new(|event| {
            eprintln!("{}", event.format_simple());
        }))))
    } else {
        Ok(processor)
    }
}

/// Process a single file or a whole directory into a report.
///
/// A single file that fails is an error; inside a directory, failures are
/// collected into the report.
pub fn process_path(
    processor: &DocumentProcessor,
    path: &Path,
    config: &AppConfig,
) -> AppResult<DirectoryReport> {
    if path.is_file() {
        let chunks = processor.process_file(path)?;
        return Ok(DirectoryReport {
            processed: vec![FileSummary {
                path: path.to_path_buf(),
                chunks: chunks.len(),
            }],
            chunks,
            failures: Vec::new(),
        });
    }

    if path.is_dir() {
        return processor.process_directory_report(path, Some(&config.extensions));
    }

    // Let the processor report the precise error kind.
    if path.extension().is_some() {
        processor.process_file(path).map(|_| DirectoryReport::default())
    } else {
        processor.process_directory_report(path, Some(&config.extensions))
    }
}

/// Resolve the target path: explicit argument or configured documents dir.
pub fn target_path(path: Option<&PathBuf>, config: &AppConfig) -> PathBuf {
    path.cloned().unwrap_or_else(|| config.documents_dir.clone())
}

/// Human-readable statistics block.
pub fn print_stats(stats: &Stats) {
    println!("Total chunks: {}", stats.total_chunks);
    println!("Average chunk length: {:.1} chars", stats.avg_chunk_length);
    println!(
        "Chunk length range: {} - {} chars",
        stats.min_chunk_length, stats.max_chunk_length
    );
    println!("Unique sources: {}", stats.unique_sources);
    for source in &stats.sources {
        println!("  - {}", source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::AppError;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.chunk_size = 50;
        config.chunk_overlap = 10;
        config
    }

    #[test]
    fn test_process_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("akp.txt");
        std::fs::write(&path, "Madde 1: Partinin adı").unwrap();

        let config = config();
        let processor = build_processor(&config).unwrap();
        let report = process_path(&processor, &path, &config).unwrap();

        assert_eq!(report.chunks.len(), 1);
        assert_eq!(report.processed.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_missing_paths_keep_error_kind() {
        let config = config();
        let processor = build_processor(&config).unwrap();

        let err =
            process_path(&processor, Path::new("/nonexistent/chp.pdf"), &config).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err =
            process_path(&processor, Path::new("/nonexistent/charters"), &config).unwrap_err();
        assert!(matches!(err, AppError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_target_path_defaults_to_documents_dir() {
        let config = config();
        assert_eq!(target_path(None, &config), config.documents_dir);

        let explicit = PathBuf::from("other");
        assert_eq!(target_path(Some(&explicit), &config), explicit);
    }
}
