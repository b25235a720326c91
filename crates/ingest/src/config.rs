//! Processor configuration.

use charter_core::{AppConfig, AppError, AppResult};

/// Separators tried coarsest first: paragraph, line, word, anywhere.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Immutable chunking settings handed to the `DocumentProcessor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks (< chunk_size)
    pub chunk_overlap: usize,

    /// Split priority, coarsest to finest; `""` means split anywhere
    pub separators: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

impl ProcessorConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the separator priority list. An empty list keeps the defaults.
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let separators: Vec<String> = separators.into_iter().map(Into::into).collect();
        if !separators.is_empty() {
            self.separators = separators;
        }
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config(
                "chunk_size must be a positive integer".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

impl From<&AppConfig> for ProcessorConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}
