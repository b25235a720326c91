//! Greedy packing of pieces into overlapping chunks.

use std::collections::VecDeque;

use super::separator::Piece;
use super::TextSpan;

/// Pack consecutive pieces into chunks of at most `chunk_size` characters.
///
/// When the next piece would overflow the current chunk, the chunk is
/// emitted and whole pieces are dropped from its front until what remains
/// is at most `chunk_overlap` characters; the remainder opens the next chunk.
/// Every piece must be shorter than `chunk_size`.
pub(super) fn merge_pieces(
    source: &str,
    pieces: &[Piece<'_>],
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut current: VecDeque<(Piece<'_>, usize)> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = piece.char_len();

        if total + len > chunk_size {
            if total > chunk_size {
                tracing::warn!(
                    "Created a chunk of size {}, which is longer than the specified {}",
                    total,
                    chunk_size
                );
            }

            if let (Some(first), Some(last)) = (current.front(), current.back()) {
                if let Some(span) = TextSpan::trimmed(source, first.0.start, last.0.end()) {
                    spans.push(span);
                }

                while total > chunk_overlap || (total + len > chunk_size && total > 0) {
                    match current.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }
        }

        current.push_back((*piece, len));
        total += len;
    }

    if let (Some(first), Some(last)) = (current.front(), current.back()) {
        if let Some(span) = TextSpan::trimmed(source, first.0.start, last.0.end()) {
            spans.push(span);
        }
    }

    spans
}
