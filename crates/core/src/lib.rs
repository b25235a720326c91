//! Charter Core Library
//!
//! Foundational utilities shared by the charter ingest pipeline and CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, SUPPORTED_EXTENSIONS};
