//! Per-file progress for directory runs.
//!
//! Large charter collections take a while to parse. Callers that want
//! incremental feedback hand the processor a callback; without one, events
//! are dropped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Stage a directory run has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Matching files were collected
    Discover,
    /// A file is about to be loaded
    Parse,
    /// A file was split into chunks
    Chunk,
    /// A file failed and was left out
    Skip,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Discover => "discover",
            Phase::Parse => "parse",
            Phase::Chunk => "chunk",
            Phase::Skip => "skip",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress notification.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub phase: Phase,

    /// 1-based index of the file being handled; the file count for `Discover`
    pub current: usize,

    /// Files in the run
    pub total: usize,

    /// File (or, for `Discover`, directory) the event is about
    pub path: PathBuf,

    /// Chunks produced, set for `Chunk`
    pub chunks: Option<usize>,

    /// Failure reason, set for `Skip`
    pub error: Option<String>,

    /// Seconds since the reporter was created
    pub elapsed_secs: f64,
}

impl ProgressEvent {
    /// Completion ratio in percent; 100 for an empty run.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.current as f64 / self.total as f64 * 100.0
        }
    }

    /// Single line for terminal output.
    pub fn format_simple(&self) -> String {
        let detail = match (self.phase, self.chunks, &self.error) {
            (Phase::Discover, _, _) => {
                format!("{} files in {}", self.total, self.path.display())
            }
            (Phase::Chunk, Some(chunks), _) => {
                format!("{}: {} chunks", self.path.display(), chunks)
            }
            (Phase::Skip, _, Some(error)) => format!("{} skipped: {}", self.path.display(), error),
            _ => self.path.display().to_string(),
        };

        format!(
            "[{}] {}/{} ({:.0}%) {}",
            self.phase,
            self.current,
            self.total,
            self.percentage(),
            detail
        )
    }
}

/// Callback receiving progress events.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Emits progress events to an optional callback.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    started: Instant,
}

impl ProgressReporter {
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(callback),
            started: Instant::now(),
        }
    }

    /// A reporter that drops every event.
    pub fn noop() -> Self {
        Self {
            callback: None,
            started: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.callback.is_some()
    }

    fn emit(
        &self,
        phase: Phase,
        current: usize,
        total: usize,
        path: &Path,
        chunks: Option<usize>,
        error: Option<String>,
    ) {
        let Some(callback) = &self.callback else {
            return;
        };

        let event = ProgressEvent {
            phase,
            current,
            total,
            path: path.to_path_buf(),
            chunks,
            error,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        };

        tracing::trace!(
            phase = %event.phase,
            current = event.current,
            total = event.total,
            path = %event.path.display(),
            "Progress event"
        );

        callback(event);
    }

    pub fn discover(&self, dir: &Path, files_found: usize) {
        self.emit(Phase::Discover, files_found, files_found, dir, None, None);
    }

    pub fn parse(&self, current: usize, total: usize, file: &Path) {
        self.emit(Phase::Parse, current, total, file, None, None);
    }

    pub fn chunk(&self, current: usize, total: usize, file: &Path, chunks: usize) {
        self.emit(Phase::Chunk, current, total, file, Some(chunks), None);
    }

    pub fn skip(&self, current: usize, total: usize, file: &Path, error: &str) {
        self.emit(Phase::Skip, current, total, file, None, Some(error.to_string()));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
