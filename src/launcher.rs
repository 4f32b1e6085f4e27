use crate::system::{project_root, run_agent};
use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use std::process::exit;

use livebench_launcher::{
    apply_port_default, env_is_set, extend_python_path, first_missing_credential,
    list_config_alternatives, EnvFile, RunConfig, CONFIG_DIR, ENV_FILE, HTTP_PORT_VAR,
    WEB_SEARCH_KEY_VAR,
};

// Launcher handles the pre-flight checks and delegates to the agent
pub struct Launcher {
    config_path: PathBuf,
}

impl Launcher {
    #[must_use]
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Run the full launch sequence: load the environment file, validate
    /// preconditions, print the run summary, delegate to the agent and
    /// print the completion banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or the agent
    /// process cannot be spawned. Missing-file and missing-credential
    /// failures terminate the process directly with status 1.
    pub fn run(&self) -> Result<()> {
        print_header();

        self.load_env_file()?;
        self.check_config_exists();
        check_credentials();
        prepare_environment();

        let config = RunConfig::from_file(&self.config_path)?;
        self.print_summary(&config);

        println!("starting agent...");
        run_agent(&self.config_path)?;

        print_completion();
        Ok(())
    }

    // Load the optional .env file into the process environment
    fn load_env_file(&self) -> Result<()> {
        if Path::new(ENV_FILE).exists() {
            let env_file = EnvFile::from_file(ENV_FILE)?;
            env_file.apply();
            println!("✓ loaded {} variables from {ENV_FILE}", env_file.vars.len());
        } else {
            println!("no {ENV_FILE} file found, using current environment");
        }
        Ok(())
    }

    // Verify the configuration file exists; fatal with a listing of
    // alternatives otherwise
    fn check_config_exists(&self) {
        if self.config_path.is_file() {
            println!("✓ configuration file: {}", self.config_path.display());
            return;
        }

        eprintln!(
            "✗ configuration file not found: {}",
            self.config_path.display()
        );

        let alternatives = list_config_alternatives(CONFIG_DIR);
        if alternatives.is_empty() {
            eprintln!("no configuration files found in '{CONFIG_DIR}'");
        } else {
            eprintln!("available configurations in '{CONFIG_DIR}':");
            for name in &alternatives {
                eprintln!("  - {name}");
            }
        }

        exit(1);
    }

    // Print the formatted run summary
    fn print_summary(&self, config: &RunConfig) {
        let file_name = self
            .config_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config_path.display().to_string());

        println!();
        println!("==========================================");
        println!("  config:           {file_name}");
        println!("  signature:        {}", config.signature);
        println!("  base model:       {}", config.basemodel);
        println!("  period:           {} -> {}", config.init_date, config.end_date);
        println!("  initial balance:  {}", config.balance_display());
        println!("==========================================");
        println!();
    }
}

fn print_header() {
    println!("==========================================");
    println!("  LiveBench agent launcher");
    println!("==========================================");
}

// Remediation hint for a missing credential
fn credential_hint(name: &str) -> &'static str {
    if name == WEB_SEARCH_KEY_VAR {
        "export WEB_SEARCH_API_KEY=<your key> (tavily is the default provider)"
    } else {
        "export OPENAI_API_KEY=<your key> or add it to .env"
    }
}

// Credential checks run in a fixed order; the first failure terminates
// before the next check is evaluated
fn check_credentials() {
    let missing = first_missing_credential(|name| {
        if env_is_set(name) {
            println!("✓ {name} is set");
            true
        } else {
            false
        }
    });

    if let Some(name) = missing {
        eprintln!("✗ {name} is not set");
        eprintln!("  {}", credential_hint(name));
        exit(1);
    }
}

// Apply environment defaults for the agent process
fn prepare_environment() {
    apply_port_default();
    println!(
        "✓ {HTTP_PORT_VAR}={}",
        env::var(HTTP_PORT_VAR).unwrap_or_default()
    );

    let root = project_root();
    extend_python_path(&root);
    println!("✓ PYTHONPATH includes {root}");
}

fn print_completion() {
    println!();
    println!("==========================================");
    println!("  agent run finished");
    println!("==========================================");
    println!("dashboard: http://localhost:3000");
    println!("api docs:  http://localhost:8000/docs");
}
