//! Tests for the full load → split → annotate pipeline.

use crate::loader::{docx_fixtures, pdf_fixtures};
use crate::progress::{Phase, ProgressEvent, ProgressReporter};
use crate::types::keys;
use crate::{get_stats, ChunkBatch, DocumentProcessor, ProcessorConfig};
use charter_core::{AppConfig, AppError};
use serde_json::{json, Value};
use std::fs;
use std::sync::{Arc, Mutex};

#[cfg(test)]
mod tests {
    use super::*;

    /// Six 415-character paragraphs joined by blank lines: 2500 characters.
    fn long_charter() -> String {
        let paragraphs: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|letter| letter.repeat(415))
            .collect();
        paragraphs.join("\n\n")
    }

    #[test]
    fn test_long_text_chunks_on_paragraphs() {
        let text = long_charter();
        assert_eq!(text.chars().count(), 2500);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuzuk.txt");
        fs::write(&path, &text).unwrap();

        let processor = DocumentProcessor::new(ProcessorConfig::new(1000, 200)).unwrap();
        let chunks = processor.process_file(&path).unwrap();

        assert_eq!(chunks.len(), 3);
        let ids: Vec<u64> = chunks.iter().filter_map(|c| c.chunk_id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        for chunk in &chunks {
            assert!(chunk.char_len() <= 1000);
            assert_eq!(chunk.total_chunks(), Some(3));
            assert_eq!(chunk.source_file(), Some("tuzuk.txt"));
        }
        assert!(chunks[0].content.starts_with('a'));
        assert!(chunks[2].content.ends_with('f'));
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text: Vec<String> = (0..40).map(|i| format!("kelime{:02}", i)).collect();
        let text = text.join(" ");

        let processor = DocumentProcessor::new(ProcessorConfig::new(50, 20)).unwrap();
        let chunks = processor.chunk_documents(&[crate::Document::new(text, Default::default())]);
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let last_word = pair[0].content.split(' ').last().unwrap();
            assert!(
                pair[1].content.contains(last_word),
                "expected {:?} to repeat in {:?}",
                last_word,
                pair[1].content
            );
            assert!(pair[0].char_len() <= 50);
        }
    }

    #[test]
    fn test_turkish_text_survives_round_trip() {
        let text = "Türkiye Büyük Millet Meclisi; şeffaflık, çoğulculuk ve ığdır ilçesi.";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hdp.txt");
        fs::write(&path, text).unwrap();

        let processor = DocumentProcessor::new(ProcessorConfig::default()).unwrap();
        let chunks = processor.process_file(&path).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].metadata[keys::PAGE], Value::Null);
    }

    #[test]
    fn test_pdf_pages_carry_page_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chp.pdf");
        pdf_fixtures::write_pdf(&path, &["Party Charter", "Article Two"]);

        let processor = DocumentProcessor::new(ProcessorConfig::default()).unwrap();

        let pages = processor.load_document(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].metadata[keys::TOTAL_PAGES], json!(2));

        let chunks = processor.process_file(&path).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page(), Some(1));
        assert_eq!(chunks[1].page(), Some(2));
        assert!(chunks[1].content.contains("Article Two"));
        assert_eq!(chunks[1].chunk_id(), Some(1));
        assert_eq!(chunks[1].total_chunks(), Some(2));
    }

    #[test]
    fn test_docx_through_processor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iyi.docx");
        docx_fixtures::write_docx(&path, &["Amaç ve ilkeler", "Kuruluş"], "Ek madde");

        let processor = DocumentProcessor::new(ProcessorConfig::default()).unwrap();
        let chunks = processor.process_file(&path).unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].content.contains("Amaç ve ilkeler"));
        assert_eq!(chunks[0].source_file(), Some("iyi.docx"));
        assert_eq!(chunks[0].metadata[keys::PAGE], Value::Null);
    }

    #[test]
    fn test_directory_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "Geçerli tüzük metni").unwrap();
        fs::write(dir.path().join("b.pdf"), b"this is not a pdf").unwrap();
        fs::write(dir.path().join("c.csv"), "ignored").unwrap();

        let events = Arc::new(Mutex::new(Vec::<ProgressEvent>::new()));
        let sink = events.clone();
        let processor = DocumentProcessor::new(ProcessorConfig::default())
            .unwrap()
            .with_progress(ProgressReporter::new(Arc::new(move |event| {
                sink.lock().unwrap().push(event);
            })));

        let report = processor.process_directory_report(dir.path(), None).unwrap();

        assert_eq!(report.files_seen(), 2);
        assert_eq!(report.chunks.len(), 1);
        assert_eq!(report.chunks[0].source_file(), Some("a.txt"));
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("b.pdf"));

        let phases: Vec<Phase> = events.lock().unwrap().iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Discover, Phase::Parse, Phase::Chunk, Phase::Parse, Phase::Skip]
        );

        let chunks = processor.process_directory(dir.path(), None).unwrap();
        assert_eq!(chunks, report.chunks);
    }

    #[test]
    fn test_invalid_settings_fail_before_io() {
        let mut config = AppConfig::default();
        config.chunk_size = 100;
        config.chunk_overlap = 150;
        config.documents_dir = "/nonexistent/charters".into();

        let err = DocumentProcessor::new(ProcessorConfig::from(&config)).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_stats_and_batch_over_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("akp.txt"), "Birinci\n\nİkinci").unwrap();
        fs::write(dir.path().join("chp.txt"), "Üçüncü").unwrap();

        let processor = DocumentProcessor::new(ProcessorConfig::new(10, 0)).unwrap();
        let chunks = processor.process_directory(dir.path(), None).unwrap();

        let stats = processor.get_stats(&chunks);
        assert_eq!(stats, get_stats(&chunks));
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.unique_sources, 2);
        assert_eq!(stats.sources, vec!["akp.txt", "chp.txt"]);
        assert_eq!(stats.min_chunk_length, 6);
        assert_eq!(stats.max_chunk_length, 7);

        let batch = ChunkBatch::from_chunks(&chunks);
        assert_eq!(batch.texts, vec!["Birinci", "İkinci", "Üçüncü"]);
        assert_eq!(batch.metadatas[2][keys::CHUNK_ID], json!(0));
    }
}
