//! Runtime configuration loaded from a YAML file
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Lookup order for the file: `$TRIO_CONFIG`, then `<config dir>/trio/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_LOG_FILE, DEFAULT_PING_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_ROTATION_INTERVAL_MS, DEFAULT_ROTATION_URLS, DEFAULT_USERNAME,
};

const CONFIG_ENV: &str = "TRIO_CONFIG";
const API_BASE_ENV: &str = "TRIO_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the user API, without trailing slash
    pub api_base: String,
    pub ping_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Initial value of the lookup form when the route carries no username
    pub default_username: String,
    pub log_file: String,
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    pub rotation: RotationConfig,
}

/// Periodic navigation through a fixed list of paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub urls: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: String::from(DEFAULT_API_BASE),
            ping_delay_ms: DEFAULT_PING_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_username: String::from(DEFAULT_USERNAME),
            log_file: String::from(DEFAULT_LOG_FILE),
            log_level: String::from("info"),
            rotation: RotationConfig::default(),
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            enabled: false,
            interval_ms: DEFAULT_ROTATION_INTERVAL_MS,
            urls: DEFAULT_ROTATION_URLS.iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            config.api_base = base;
        }
        config.normalize();
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    pub fn ping_delay(&self) -> Duration {
        Duration::from_millis(self.ping_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn rotation_interval(&self) -> Duration {
        // A zero interval would make tokio's interval panic
        Duration::from_millis(self.rotation.interval_ms.max(1))
    }

    fn normalize(&mut self) {
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("trio").join("config.yaml"))
}
