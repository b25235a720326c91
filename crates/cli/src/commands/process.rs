//! Process command handler.
//!
//! Loads and chunks a file or directory, prints statistics and optionally
//! writes the chunks out as JSON Lines.

use super::{build_processor, print_stats, process_path, target_path};
use charter_core::{config::AppConfig, AppResult};
use charter_ingest::{write_jsonl, DirectoryReport, Document};
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Characters of the first chunk shown by `--preview`.
const PREVIEW_CHARS: usize = 200;

/// Process a file or directory into chunks
#[derive(Args, Debug)]
pub struct ProcessCommand {
    /// File or directory to process (default: configured documents dir)
    pub path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write all chunks to this file as JSON Lines
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the beginning of the first chunk and its metadata
    #[arg(long)]
    pub preview: bool,
}

impl ProcessCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let target = target_path(self.path.as_ref(), config);
        tracing::info!("Executing process command for {:?}", target);

        let processor = build_processor(config)?;
        let report = process_path(&processor, &target, config)?;
        let stats = processor.get_stats(&report.chunks);

        if let Some(output) = &self.output {
            let writer = BufWriter::new(File::create(output)?);
            write_jsonl(&report.chunks, writer)?;
            tracing::info!("Wrote {} chunks to {:?}", report.chunks.len(), output);
        }

        if self.json {
            let output = serde_json::json!({
                "path": target,
                "files": report.processed,
                "failures": report.failures,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_summary(&report);
            print_stats(&stats);
            if let Some(output) = &self.output {
                println!("Chunks written to {}", output.display());
            }
        }

        if self.preview {
            match report.chunks.first() {
                Some(chunk) => print_preview(chunk)?,
                None => println!("No chunks to preview"),
            }
        }

        Ok(())
    }
}

fn print_summary(report: &DirectoryReport) {
    println!(
        "Processed {} files ({} failed)",
        report.processed.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  ! {}: {}", failure.path.display(), failure.error);
    }
}

fn print_preview(chunk: &Document) -> AppResult<()> {
    let head: String = chunk.content.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if chunk.char_len() > PREVIEW_CHARS { "..." } else { "" };

    println!();
    println!("First chunk:");
    println!("{}{}", head, ellipsis);
    println!();
    println!("Metadata:");
    println!("{}", serde_json::to_string_pretty(&chunk.metadata)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_jsonl_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Birinci madde.\n\nİkinci madde.").unwrap();
        let output = dir.path().join("chunks.jsonl");

        let mut config = AppConfig::default();
        config.chunk_size = 20;
        config.chunk_overlap = 0;

        let cmd = ProcessCommand {
            path: Some(dir.path().to_path_buf()),
            json: true,
            output: Some(output.clone()),
            preview: true,
        };
        cmd.execute(&config).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<Document> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].content, "İkinci madde.");
        assert_eq!(lines[1].chunk_id(), Some(1));
    }
}
