//! Stats command handler.

use super::{build_processor, print_stats, process_path, target_path};
use charter_core::{config::AppConfig, AppResult};
use clap::Args;
use std::path::PathBuf;

/// Show chunk statistics for a file or directory
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// File or directory to inspect (default: configured documents dir)
    pub path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let target = target_path(self.path.as_ref(), config);
        tracing::info!("Executing stats command for {:?}", target);

        let processor = build_processor(config)?;
        let report = process_path(&processor, &target, config)?;
        let stats = processor.get_stats(&report.chunks);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_stats(&stats);
        }

        Ok(())
    }
}
