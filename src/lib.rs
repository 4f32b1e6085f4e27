use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Fixed paths used by the launcher
pub const CONFIG_DIR: &str = "configs";
pub const DEFAULT_CONFIG: &str = "configs/default_config.json";
pub const ENV_FILE: &str = ".env";

// Environment variables managed by the launcher
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
pub const WEB_SEARCH_KEY_VAR: &str = "WEB_SEARCH_API_KEY";
pub const HTTP_PORT_VAR: &str = "LIVEBENCH_HTTP_PORT";

// Required credentials, in check order
pub const REQUIRED_CREDENTIALS: [&str; 2] = [OPENAI_KEY_VAR, WEB_SEARCH_KEY_VAR];
pub const DEFAULT_HTTP_PORT: &str = "8010";
pub const PYTHON_PATH_VAR: &str = "PYTHONPATH";

// Field defaults for the run configuration
fn default_name() -> String {
    "unknown".to_string()
}

fn default_date() -> String {
    "N/A".to_string()
}

fn default_balance() -> f64 {
    1000.0
}

// Agent run configuration, consumed for validation and display only.
// Every field is optional in the document; missing fields take the
// placeholder defaults.
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub signature: String,
    #[serde(default = "default_name")]
    pub basemodel: String,
    #[serde(default = "default_date")]
    pub init_date: String,
    #[serde(default = "default_date")]
    pub end_date: String,
    #[serde(default = "default_balance")]
    pub initial_balance: f64,
}

impl RunConfig {
    /// Load a run configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if it contains
    /// invalid JSON. The serde_json message is surfaced as-is.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read configuration from {path_str}"))?;

        let config: RunConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON from {path_str}"))?;

        Ok(config)
    }

    /// Parse a run configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid JSON object.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse configuration JSON")
    }

    // Balance formatted for the summary: integral values print without
    // a trailing ".0". Magnitudes beyond exact integer range keep the
    // float formatting rather than a saturated cast.
    #[must_use]
    pub fn balance_display(&self) -> String {
        if self.initial_balance.fract() == 0.0 && self.initial_balance.abs() < 1e15 {
            format!("{}", self.initial_balance as i64)
        } else {
            format!("{}", self.initial_balance)
        }
    }
}

// Optional local environment-definition file: newline-separated KEY=VALUE
// assignments loaded into the process environment.
pub struct EnvFile {
    pub vars: Vec<(String, String)>,
}

impl EnvFile {
    /// Load assignments from an environment file
    ///
    /// A missing file yields an empty set; only a present but unreadable
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Ok(Self { vars: Vec::new() });
        }

        let path_str = path_ref.to_string_lossy();
        let content = fs::read_to_string(path_ref)
            .with_context(|| format!("failed to read environment file from {path_str}"))?;

        Ok(Self {
            vars: Self::parse_assignments(&content),
        })
    }

    // Parse KEY=VALUE lines; blank lines, comments and malformed lines
    // are skipped
    #[must_use]
    pub fn parse_assignments(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    // Set each assignment into the process environment, overwriting any
    // existing value
    pub fn apply(&self) {
        for (key, value) in &self.vars {
            env::set_var(key, value);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// Resolve the configuration path: argument verbatim, else the fixed default
#[must_use]
pub fn resolve_config_path(arg: Option<&Path>) -> PathBuf {
    match arg {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG),
    }
}

// Compute the new module search path: prepend the project root, preserving
// any pre-existing value
#[must_use]
pub fn prepend_search_path(root: &str, existing: Option<&str>) -> String {
    match existing {
        Some(value) if !value.is_empty() => format!("{root}:{value}"),
        _ => root.to_string(),
    }
}

// Check that a variable is set to a non-empty value
#[must_use]
pub fn env_is_set(name: &str) -> bool {
    env::var(name).map(|value| !value.is_empty()).unwrap_or(false)
}

// Walk the required credentials in check order and return the first one
// the lookup reports missing; later credentials are not evaluated once
// one has failed
pub fn first_missing_credential<F>(lookup: F) -> Option<&'static str>
where
    F: Fn(&str) -> bool,
{
    REQUIRED_CREDENTIALS
        .iter()
        .find(|name| !lookup(name))
        .copied()
}

// Set the HTTP port variable to its default; a pre-existing value wins
pub fn apply_port_default() {
    if !env_is_set(HTTP_PORT_VAR) {
        env::set_var(HTTP_PORT_VAR, DEFAULT_HTTP_PORT);
    }
}

// Prefix the Python module search path with the project root, preserving
// any pre-existing value
pub fn extend_python_path(root: &str) {
    let existing = env::var(PYTHON_PATH_VAR).ok();
    env::set_var(PYTHON_PATH_VAR, prepend_search_path(root, existing.as_deref()));
}

// List base names of *.json files in a configuration directory, sorted.
// An unreadable or missing directory yields an empty list.
#[must_use]
pub fn list_config_alternatives<P: AsRef<Path>>(dir: P) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    names.sort();
    names
}
