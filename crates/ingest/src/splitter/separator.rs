//! Separator strategies for the recursive splitter.

/// A contiguous slice of the text being split, with its byte offset in the
/// original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Piece<'a> {
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One level of the separator hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    /// Split at every occurrence of a literal string.
    Literal(String),
    /// Split between any two characters.
    Anywhere,
}

impl Separator {
    /// `""` is the split-anywhere fallback; anything else is literal.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Anywhere
        } else {
            Self::Literal(raw.to_string())
        }
    }

    /// Partition a piece, or `None` when this separator does not occur in it.
    ///
    /// Each separator occurrence stays attached to the start of the piece
    /// that follows it, so the pieces tile the input without gaps.
    /// Empty pieces are dropped.
    pub fn partition<'a>(&self, piece: Piece<'a>) -> Option<Vec<Piece<'a>>> {
        match self {
            Self::Anywhere => Some(
                piece
                    .text
                    .char_indices()
                    .map(|(i, c)| Piece::new(&piece.text[i..i + c.len_utf8()], piece.start + i))
                    .collect(),
            ),
            Self::Literal(sep) => {
                if !piece.text.contains(sep.as_str()) {
                    return None;
                }

                let mut cuts: Vec<usize> = piece
                    .text
                    .match_indices(sep.as_str())
                    .map(|(i, _)| i)
                    .collect();
                if cuts.first() != Some(&0) {
                    cuts.insert(0, 0);
                }
                cuts.push(piece.text.len());

                Some(
                    cuts.windows(2)
                        .filter(|w| w[1] > w[0])
                        .map(|w| Piece::new(&piece.text[w[0]..w[1]], piece.start + w[0]))
                        .collect(),
                )
            }
        }
    }

    pub fn is_anywhere(&self) -> bool {
        matches!(self, Self::Anywhere)
    }
}
