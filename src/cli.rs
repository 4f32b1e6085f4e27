use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::launcher::Launcher;
use livebench_launcher::resolve_config_path;

// CLI arguments parsing structure
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the agent run configuration JSON
    /// (defaults to configs/default_config.json)
    pub config: Option<PathBuf>,
}

// Execute the launch sequence
pub fn execute_command(cli: &Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref());
    Launcher::new(config_path).run()
}
