//! Error types for the charter document pipeline.
//!
//! A single error enum covers configuration, filesystem, format and
//! parsing failures so every crate in the workspace can share `AppResult`.

use std::path::PathBuf;
use thiserror::Error;

/// Extensions the document loaders understand, in display order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".pdf", ".txt", ".docx", ".doc"];

/// Unified error type for the charter workspace.
///
/// All fallible functions return `Result<T, AppError>`.
/// Library code never panics; failures are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration (chunk sizes, malformed settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file path that does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory path that does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Extension outside the supported set
    #[error("Unsupported file format: {extension}. Supported formats: {supported}")]
    UnsupportedFormat { extension: String, supported: String },

    /// A format parser failed on an existing file
    #[error("Error loading {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Build an `UnsupportedFormat` error naming the extensions that would
    /// have been accepted. A missing extension is shown as `(none)`.
    pub fn unsupported_format<I, S>(extension: impl Into<String>, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extension = extension.into();
        let supported: Vec<String> = supported
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .collect();

        AppError::UnsupportedFormat {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                extension
            },
            supported: supported.join(", "),
        }
    }

    /// Wrap a parser failure together with the path it happened on.
    pub fn load<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::Load {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// True for mistakes made by the caller (missing path, bad extension,
    /// bad configuration). These are never retried.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::NotFound(_)
                | AppError::DirectoryNotFound(_)
                | AppError::UnsupportedFormat { .. }
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
