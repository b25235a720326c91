//! PDF loader using lopdf.

use super::{DocumentLoader, LoaderError};
use crate::types::PageText;
use lopdf::Document as PdfDocument;
use std::path::Path;

/// Extracts one text per page, numbered from 1.
///
/// A page whose text cannot be extracted is kept as an empty page so page
/// numbers stay aligned with the source document. If extraction failed and
/// no page yielded any text, the file fails with the last extraction error.
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".pdf"]
    }

    fn load(&self, path: &Path) -> Result<Vec<PageText>, LoaderError> {
        let doc = PdfDocument::load(path)?;
        let extracted = doc
            .get_pages()
            .into_keys()
            .map(|page_num| (page_num, doc.extract_text(&[page_num])))
            .collect();

        let pages = collect_pages(path, extracted)?;
        tracing::debug!("Loaded {} pages from {:?}", pages.len(), path);

        Ok(pages)
    }
}

/// Turn per-page extraction results into page texts.
fn collect_pages(
    path: &Path,
    extracted: Vec<(u32, lopdf::Result<String>)>,
) -> Result<Vec<PageText>, LoaderError> {
    let mut pages = Vec::with_capacity(extracted.len());
    let mut last_error = None;

    for (page_num, result) in extracted {
        let text = match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "Failed to extract text from page {} of {:?}: {}",
                    page_num,
                    path,
                    e
                );
                last_error = Some(e);
                String::new()
            }
        };
        pages.push(PageText::page(text, page_num));
    }

    let all_failed = pages.iter().all(|p| p.text.is_empty());
    match last_error {
        Some(e) if all_failed => Err(LoaderError::Pdf(e)),
        _ => Ok(pages),
    }
}
