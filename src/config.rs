//! Configuration system
//!
//! Provides configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety
//!
//! There is no process-wide instance: the binary loads a [`Config`] once and
//! hands it to the components that need it.

use crate::file_discovery::normalize_extension;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Data source locations
    pub paths: PathsConfig,

    /// Log and export scanning knobs
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Base for every relative path below
    pub project_root: PathBuf,
    pub stats_file: PathBuf,
    pub log_directory: PathBuf,
    pub screenshots_directory: PathBuf,
    /// Where our own log files are written; never scanned
    pub diagnostics_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Lines (event line included) searched for a purchase confirmation
    pub confirmation_window: usize,
    pub log_extensions: Vec<String>,
    pub default_campaign: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "WARN".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            stats_file: PathBuf::from("log").join("cl1").join("cl1_monthly.json"),
            log_directory: PathBuf::from("log"),
            screenshots_directory: PathBuf::from("screenshots"),
            diagnostics_directory: PathBuf::from("diagnostics"),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            confirmation_window: crate::log_scanner::DEFAULT_CONFIRMATION_WINDOW,
            log_extensions: vec!["log".to_string(), "txt".to_string()],
            default_campaign: crate::DEFAULT_CAMPAIGN.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            paths: PathsConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl PathsConfig {
    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn stats_file(&self) -> PathBuf {
        self.resolve(&self.stats_file)
    }

    pub fn log_directory(&self) -> PathBuf {
        self.resolve(&self.log_directory)
    }

    pub fn screenshots_directory(&self) -> PathBuf {
        self.resolve(&self.screenshots_directory)
    }

    pub fn diagnostics_directory(&self) -> PathBuf {
        self.resolve(&self.diagnostics_directory)
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let config = Self::load_layered()?;
        config.validate()?;
        Ok(config)
    }

    /// File and environment layers without validation, for callers that
    /// still apply their own overrides before calling [`Config::validate`]
    pub fn load_layered() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("opsi-stats.toml"),
            PathBuf::from(".opsi-stats.toml"),
            dirs::config_dir()
                .map(|d| d.join("opsi-stats").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // Path overrides
        if let Ok(val) = env::var("OPSI_STATS_ROOT") {
            self.paths.project_root = PathBuf::from(val);
        }
        if let Ok(val) = env::var("OPSI_STATS_FILE") {
            self.paths.stats_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("OPSI_STATS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("OPSI_STATS_SCREENSHOTS_DIR") {
            self.paths.screenshots_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("OPSI_STATS_DIAGNOSTICS_DIR") {
            self.paths.diagnostics_directory = PathBuf::from(val);
        }

        // Scan overrides
        if let Ok(val) = env::var("OPSI_STATS_WINDOW") {
            self.scan.confirmation_window = val
                .parse()
                .context("Invalid OPSI_STATS_WINDOW")?;
        }
        if let Ok(val) = env::var("OPSI_STATS_CAMPAIGN") {
            self.scan.default_campaign = val;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scan.confirmation_window == 0 {
            return Err(anyhow::anyhow!("Confirmation window must be at least 1 line"));
        }

        if self
            .scan
            .log_extensions
            .iter()
            .all(|ext| normalize_extension(ext).is_none())
        {
            return Err(anyhow::anyhow!("At least one log extension is required"));
        }

        validate_campaign(&self.scan.default_campaign)?;

        if self.paths.diagnostics_directory() == self.paths.log_directory() {
            return Err(anyhow::anyhow!(
                "Diagnostics directory must differ from the scanned log directory ({})",
                self.paths.log_directory().display()
            ));
        }

        if !self.paths.project_root.exists() {
            warn!(
                project_root = %self.paths.project_root.display(),
                "Project root does not exist, all figures will be zero"
            );
        }

        Ok(())
    }

    /// Save current configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Configuration saved to file");

        Ok(())
    }
}

/// A campaign names a single directory under the screenshots root
pub fn validate_campaign(campaign: &str) -> Result<()> {
    if campaign.trim().is_empty() {
        return Err(anyhow::anyhow!("Campaign name cannot be empty"));
    }
    if campaign.contains(['/', '\\']) || campaign == "." || campaign == ".." {
        return Err(anyhow::anyhow!(
            "Campaign name must be a single directory name, got {campaign:?}"
        ));
    }
    Ok(())
}
