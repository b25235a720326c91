//! Charter CLI
//!
//! Main entry point for the charter command-line tool.
//! Loads party charter documents, splits them into chunks and reports
//! statistics, ready for hand-off to a vector store.

mod commands;

use anyhow::Context;
use charter_core::{config::AppConfig, logging, AppError};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use commands::{ProcessCommand, StatsCommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Charter CLI - document ingestion for party charters
#[derive(Parser, Debug)]
#[command(name = "charter")]
#[command(about = "Load, chunk and inspect party charter documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "CHARTER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug, prints progress)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any non-empty NO_COLOR other than "0"/"false" also disables it)
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    no_color: bool,

    /// Maximum characters per chunk
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long, global = true)]
    chunk_overlap: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a file or directory into chunks
    Process(ProcessCommand),

    /// Show chunk statistics for a file or directory
    Stats(StatsCommand),
}

fn main() -> ExitCode {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit status for a failed run: 2 for bad input or settings, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AppError>() {
        Some(app_err) if app_err.is_caller_error() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load base configuration from .env, YAML and environment
    let config = AppConfig::load_with_file(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Apply CLI overrides
    let config = config.with_overrides(
        None,
        cli.chunk_size,
        cli.chunk_overlap,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("Charter CLI starting");
    tracing::debug!("Documents dir: {:?}", config.documents_dir);
    tracing::debug!(
        "Chunking: size {}, overlap {}",
        config.chunk_size,
        config.chunk_overlap
    );

    let command_name = match &cli.command {
        Commands::Process(_) => "process",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Process(cmd) => cmd.execute(&config),
        Commands::Stats(cmd) => cmd.execute(&config),
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result.map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_env_accepts_any_value() {
        std::env::set_var("NO_COLOR", "1");
        let parsed = Cli::try_parse_from(["charter", "stats"]);
        std::env::remove_var("NO_COLOR");

        let cli = parsed.unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn test_no_color_flag() {
        let cli = Cli::try_parse_from(["charter", "--no-color", "process"]).unwrap();
        assert!(cli.no_color);
    }

    #[test]
    fn test_exit_code_by_error_kind() {
        let not_found = anyhow::Error::from(AppError::NotFound(PathBuf::from("chp.pdf")));
        assert_eq!(exit_code(&not_found), 2);

        let config = anyhow::Error::from(AppError::Config("overlap too large".into()))
            .context("Failed to load configuration");
        assert_eq!(exit_code(&config), 2);

        let load = anyhow::Error::from(AppError::load("chp.pdf", std::io::Error::other("boom")));
        assert_eq!(exit_code(&load), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("unexpected")), 1);
    }
}
