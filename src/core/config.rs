use crate::utils::format::gib_to_bytes;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub qbit: QbitConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Resume paused downloads when space allows. CLI flags take precedence.
    #[serde(default)]
    pub autoresume: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QbitConfig {
    pub host: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub download_dir: PathBuf,
    #[serde(default = "default_min_free_gb")]
    pub min_free_gb: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Append log output to this file instead of stdout
    pub path: Option<PathBuf>,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            path: None,
            console: default_console(),
        }
    }
}

/// Per-run settings handed to the runner
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub download_dir: PathBuf,
    pub min_free_bytes: u64,
    pub autoresume: bool,
    pub dry_run: bool,
}

// Default value functions
fn default_min_free_gb() -> f64 {
    10.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.qbit.host.trim().is_empty() {
            bail!("qbit.host must not be empty");
        }

        if self.qbit.user.is_empty() {
            bail!("qbit.user must not be empty");
        }

        if self.storage.download_dir.as_os_str().is_empty() {
            bail!("storage.download_dir must not be empty");
        }

        if !self.storage.min_free_gb.is_finite() || self.storage.min_free_gb < 0.0 {
            bail!(
                "storage.min_free_gb must be a non-negative number, got {}",
                self.storage.min_free_gb
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }

    pub fn min_free_bytes(&self) -> u64 {
        gib_to_bytes(self.storage.min_free_gb)
    }

    /// Resolve run settings; `autoresume_flag` is the command-line override, if any
    pub fn run_settings(&self, autoresume_flag: Option<bool>, dry_run: bool) -> RunSettings {
        RunSettings {
            download_dir: self.storage.download_dir.clone(),
            min_free_bytes: self.min_free_bytes(),
            autoresume: autoresume_flag.or(self.autoresume).unwrap_or(false),
            dry_run,
        }
    }
}
