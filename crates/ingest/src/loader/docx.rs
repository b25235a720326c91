//! DOCX loader using docx-rs.

use super::{DocumentLoader, LoaderError};
use crate::types::PageText;
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use std::path::Path;

/// Extracts the plain text of a Word document, formatting dropped.
///
/// Paragraphs are separated by blank lines; table cells contribute their
/// paragraphs in reading order. Also registered for `.doc`, which only
/// succeeds for files that are really Office Open XML packages.
pub struct DocxLoader;

impl DocumentLoader for DocxLoader {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".docx", ".doc"]
    }

    fn load(&self, path: &Path) -> Result<Vec<PageText>, LoaderError> {
        let bytes = std::fs::read(path)?;
        let docx = docx_rs::read_docx(&bytes)?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                DocumentChild::Table(t) => collect_table(t, &mut paragraphs),
                _ => {}
            }
        }

        let text = paragraphs
            .iter()
            .map(|p| p.trim_end())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        tracing::debug!("Loaded {} paragraphs from {:?}", paragraphs.len(), path);

        Ok(vec![PageText::whole(text)])
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            _ => {}
        }
    }
}

#[allow(irrefutable_let_patterns)]
fn collect_table(table: &Table, paragraphs: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else {
            continue;
        };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                    TableCellContent::Table(t) => collect_table(t, paragraphs),
                    _ => {}
                }
            }
        }
    }
}
