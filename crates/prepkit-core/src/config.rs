use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clean::rules::RuleConfig;

/// Default size above which the scraper asks before including a file (10 MiB).
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Scraper settings (`[scraper]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Text files larger than this are offered to the exclusion policy.
    pub large_file_threshold: u64,
    /// Files larger than this are skipped without asking. None = no cap.
    pub max_file_size: Option<u64>,
    /// Directory names pruned from the walk.
    pub skip_dirs: Vec<String>,
    /// Extensions (with or without leading dot) treated as binary on top of the built-in list.
    pub extra_binary_extensions: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            max_file_size: None,
            skip_dirs: vec![".git".to_string()],
            extra_binary_extensions: Vec::new(),
        }
    }
}

/// HAR cleaner settings (`[cleaner]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Per-entry keys removed regardless of retention flags.
    pub metadata_keys: Vec<String>,
    /// Extra content rules, checked before the built-in table.
    pub rules: Vec<RuleConfig>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            metadata_keys: ["timings", "cache", "pageref", "time", "_initiator", "_priority"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rules: Vec::new(),
        }
    }
}

/// HAR redactor settings (`[redactor]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactorConfig {
    /// Token substituted for the secret in replace mode when `--text` is not given.
    pub replacement: String,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            replacement: "[REDACTED]".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/prepkit/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub scraper: ScraperConfig,
    pub cleaner: CleanerConfig,
    pub redactor: RedactorConfig,
}

/// Location of the user config file, if one exists.
pub fn default_config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("prepkit")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration. An explicit path must exist; otherwise the XDG file is
/// used when present and built-in defaults when not. Nothing is written.
pub fn load(explicit: Option<&Path>) -> Result<PrepConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match default_config_path()? {
        Some(path) => load_from_path(&path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(PrepConfig::default())
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<PrepConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: PrepConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}
