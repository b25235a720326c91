//! Logging infrastructure for the charter tools.
//!
//! Diagnostics go to stderr through `tracing`; stdout stays free for
//! statistics and chunk output.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Crates whose events are shown at the requested level. Everything else
/// (PDF and DOCX parsers included) is held at `warn`.
const WORKSPACE_TARGETS: [&str; 3] = ["charter", "charter_core", "charter_ingest"];

/// Build the filter string for a log level.
///
/// A plain level (`debug`) is scoped to the workspace crates. Anything
/// containing `=` or `,` is taken as a full `EnvFilter` directive list.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_TARGETS.iter().map(|t| format!("{}={}", t, level)));
    directives.join(",")
}

/// Initialize the tracing subscriber with stderr output.
///
/// # Arguments
/// * `log_level` - Level or directive list (e.g., "debug", "charter_ingest=trace");
///   falls back to `RUST_LOG`, then `info`
/// * `no_color` - Disable colored output
///
/// # Example
/// ```no_run
/// use charter_core::logging::init_logging;
///
/// init_logging(None, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let level = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
    };

    let env_filter = EnvFilter::try_new(filter_directives(&level))
        .map_err(|e| AppError::Config(format!("Invalid log filter {:?}: {}", level, e)))?;

    let ansi =
        !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}
