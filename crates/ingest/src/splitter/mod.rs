//! Recursive character splitting.
//!
//! Text is partitioned with the coarsest separator that occurs in it,
//! the pieces are packed greedily into chunks of at most `chunk_size`
//! characters, and any piece that is too large on its own is split again
//! with the next, finer separator. Lengths are counted in characters.

mod merging;
pub mod separator;

pub use separator::{Piece, Separator};

use crate::config::ProcessorConfig;
use charter_core::AppResult;

/// A chunk of text together with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub content: String,
    pub byte_range: (usize, usize),
}

impl TextSpan {
    /// Slice `source[start..end]`, trim surrounding whitespace and keep the
    /// range in step. Returns `None` when nothing but whitespace is left.
    pub(crate) fn trimmed(source: &str, start: usize, end: usize) -> Option<Self> {
        let raw = &source[start..end];
        let leading = raw.len() - raw.trim_start().len();
        let content = raw.trim();

        if content.is_empty() {
            return None;
        }

        let span_start = start + leading;
        Some(Self {
            content: content.to_string(),
            byte_range: (span_start, span_start + content.len()),
        })
    }

    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Stateless recursive splitter; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<Separator>,
}

impl RecursiveCharacterSplitter {
    /// Build a splitter from a validated configuration.
    pub fn new(config: &ProcessorConfig) -> AppResult<Self> {
        config.validate()?;

        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            separators: config.separators.iter().map(|s| Separator::parse(s)).collect(),
        })
    }

    /// Split text into trimmed, non-empty chunks in source order.
    pub fn split_text(&self, text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        if text.is_empty() {
            return spans;
        }

        self.split_piece(text, Piece::new(text, 0), &self.separators, &mut spans);

        tracing::debug!(
            "Split {} chars into {} chunks (size: {}, overlap: {})",
            text.chars().count(),
            spans.len(),
            self.chunk_size,
            self.chunk_overlap
        );

        spans
    }

    fn split_piece<'a>(
        &self,
        source: &'a str,
        piece: Piece<'a>,
        separators: &[Separator],
        spans: &mut Vec<TextSpan>,
    ) {
        let (parts, finer) = choose_partition(piece, separators);

        let mut pending: Vec<Piece<'a>> = Vec::new();
        for part in parts {
            if part.char_len() < self.chunk_size {
                pending.push(part);
                continue;
            }

            if !pending.is_empty() {
                spans.extend(merging::merge_pieces(
                    source,
                    &pending,
                    self.chunk_size,
                    self.chunk_overlap,
                ));
                pending.clear();
            }

            if finer.is_empty() {
                // Indivisible at every remaining level: keep it whole.
                spans.extend(TextSpan::trimmed(source, part.start, part.end()));
            } else {
                self.split_piece(source, part, finer, spans);
            }
        }

        if !pending.is_empty() {
            spans.extend(merging::merge_pieces(
                source,
                &pending,
                self.chunk_size,
                self.chunk_overlap,
            ));
        }
    }
}

/// Try each separator in priority order and return the first partition plus
/// the finer separators left for oversized pieces. When nothing matches the
/// piece comes back whole with no finer levels.
fn choose_partition<'a, 's>(
    piece: Piece<'a>,
    separators: &'s [Separator],
) -> (Vec<Piece<'a>>, &'s [Separator]) {
    separators
        .iter()
        .enumerate()
        .find_map(|(i, separator)| {
            separator.partition(piece).map(|parts| {
                let finer = if separator.is_anywhere() {
                    &separators[separators.len()..]
                } else {
                    &separators[i + 1..]
                };
                (parts, finer)
            })
        })
        .unwrap_or_else(|| (vec![piece], &separators[separators.len()..]))
}
