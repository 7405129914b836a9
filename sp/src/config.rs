//! StratPlan configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local config file name
const LOCAL_CONFIG: &str = ".stratplan.yml";

/// Main StratPlan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Remote completion service configuration
    pub llm: LlmConfig,

    /// Report export configuration
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `./.stratplan.yml`, then
    /// `~/.config/stratplan/stratplan.yml`, then built-in defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::fallback_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed: the full `load` reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::fallback_paths(),
        };

        paths
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(&p).ok())
            .and_then(|config| config.log_level)
    }

    fn fallback_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("stratplan").join("stratplan.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "load_from_file: called");
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Remote completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent with every completion request
    pub model: String,

    /// API base URL (no trailing `/v1`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable used to prefill the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Fixed system instruction for every completion
    #[serde(rename = "system-prompt")]
    pub system_prompt: String,

    /// Request timeout in milliseconds, 0 disables the timeout
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            system_prompt: "You are a strategy planning assistant.".to_string(),
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable, if present
    pub fn api_key_from_env(&self) -> Option<String> {
        debug!(api_key_env = %self.api_key_env, "api_key_from_env: called");
        std::env::var(&self.api_key_env).ok().filter(|key| !key.trim().is_empty())
    }
}

/// Report export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the `<name>.txt` report is written to
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
