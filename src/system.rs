use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use std::process::Command;

// Downstream agent entrypoint
const PYTHON_BIN: &str = "python";
const AGENT_ENTRYPOINT: &str = "livebench/main.py";

// Resolve the project root used to extend the module search path
#[must_use]
pub fn project_root() -> String {
    env::current_dir()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| ".".to_string())
}

/// Run the agent entrypoint with the configuration path as its only
/// argument, blocking until it exits
///
/// The agent's exit status is not inspected or propagated; only a failure
/// to spawn the process at all is an error.
///
/// # Errors
///
/// Returns an error if the Python interpreter cannot be spawned.
pub fn run_agent(config_path: &Path) -> Result<()> {
    let _agent_status = Command::new(PYTHON_BIN)
        .arg(AGENT_ENTRYPOINT)
        .arg(config_path)
        .status()
        .with_context(|| format!("failed to run {PYTHON_BIN} {AGENT_ENTRYPOINT}"))?;

    Ok(())
}
