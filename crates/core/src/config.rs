//! Configuration management for the charter pipeline.
//!
//! Settings are merged from several sources, lowest precedence first:
//! - Built-in defaults
//! - A `.env` file in the working directory
//! - A YAML config file (`charter.yaml` or `CHARTER_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! The resulting `AppConfig` is an immutable value handed to the processor;
//! nothing downstream reads process state on its own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, SUPPORTED_EXTENSIONS};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "charter.yaml";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the party charter documents
    pub documents_dir: PathBuf,

    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,

    /// Accepted file extensions (lowercase, leading dot)
    pub extensions: Vec<String>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    ingest: Option<IngestSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngestSection {
    documents_dir: Option<PathBuf>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("./data/party_charters"),
            chunk_size: 1000,
            chunk_overlap: 200,
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `CHARTER_DOCUMENTS_DIR`: Directory of source documents
    /// - `CHARTER_CHUNK_SIZE`: Maximum characters per chunk
    /// - `CHARTER_CHUNK_OVERLAP`: Overlap between chunks
    /// - `CHARTER_EXTENSIONS`: Comma separated extension allow-list
    /// - `CHARTER_CONFIG`: Path to a YAML config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use charter_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Documents: {:?}", config.documents_dir);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with_file(None)
    }

    /// Like `load`, with an explicit YAML file taking the place of
    /// `CHARTER_CONFIG`.
    pub fn load_with_file(config_file: Option<&Path>) -> AppResult<Self> {
        // A missing .env is normal; anything else is worth a warning.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }

        Self::from_lookup(|key| match (key, config_file) {
            ("CHARTER_CONFIG", Some(path)) => Some(path.display().to_string()),
            _ => std::env::var(key).ok(),
        })
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(config_file) = lookup("CHARTER_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(dir) = lookup("CHARTER_DOCUMENTS_DIR") {
            config.documents_dir = PathBuf::from(dir);
        }

        if let Some(size) = lookup("CHARTER_CHUNK_SIZE") {
            config.chunk_size = parse_number("CHARTER_CHUNK_SIZE", &size)?;
        }

        if let Some(overlap) = lookup("CHARTER_CHUNK_OVERLAP") {
            config.chunk_overlap = parse_number("CHARTER_CHUNK_OVERLAP", &overlap)?;
        }

        if let Some(extensions) = lookup("CHARTER_EXTENSIONS") {
            config.extensions = extensions
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        config.extensions = normalize_extensions(&config.extensions);

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ingest) = config_file.ingest {
            if let Some(dir) = ingest.documents_dir {
                result.documents_dir = dir;
            }
            if let Some(size) = ingest.chunk_size {
                result.chunk_size = size;
            }
            if let Some(overlap) = ingest.chunk_overlap {
                result.chunk_overlap = overlap;
            }
            if let Some(extensions) = ingest.extensions {
                result.extensions = extensions;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over environment variables and the config file.
    pub fn with_overrides(
        mut self,
        documents_dir: Option<PathBuf>,
        chunk_size: Option<usize>,
        chunk_overlap: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(dir) = documents_dir {
            self.documents_dir = dir;
        }

        if let Some(size) = chunk_size {
            self.chunk_size = size;
        }

        if let Some(overlap) = chunk_overlap {
            self.chunk_overlap = overlap;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate chunking settings and the extension allow-list.
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

        if let Some(bad) = self.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(AppError::Config(format!(
                "Extension must start with '.': {}",
                bad
            )));
        }

        Ok(())
    }
}

/// Lowercase every extension and make sure it carries a leading dot.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| {
            let lower = e.trim().to_lowercase();
            if lower.starts_with('.') {
                lower
            } else {
                format!(".{}", lower)
            }
        })
        .collect()
}

fn parse_number(key: &str, value: &str) -> AppResult<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        AppError::Config(format!("Invalid value for {}: {:?} ({})", key, value, e))
    })
}
