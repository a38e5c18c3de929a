//! Configuration loading and management
//!
//! Handles parsing of `.tasklog.toml` configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = ".tasklog.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Task root, relative to the directory holding the config file
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Report listing configuration
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Recent task configuration
    #[serde(default)]
    pub recent: RecentConfig,

    /// Task allocation configuration
    #[serde(default)]
    pub allocator: AllocatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            reports: ReportsConfig::default(),
            recent: RecentConfig::default(),
            allocator: AllocatorConfig::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".tasks")
}

/// Bounded window applied to report listings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportsConfig {
    /// Earliest reports kept when the listing is truncated
    #[serde(default = "default_head")]
    pub head: usize,

    /// Latest reports kept when the listing is truncated
    #[serde(default = "default_tail")]
    pub tail: usize,
}

fn default_head() -> usize {
    20
}

fn default_tail() -> usize {
    30
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            head: default_head(),
            tail: default_tail(),
        }
    }
}

impl ReportsConfig {
    /// Largest listing returned untruncated
    pub fn limit(&self) -> usize {
        self.head + self.tail
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentConfig {
    /// Days back from today (inclusive) a task still counts as recent
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_window_days() -> u32 {
    30
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllocatorConfig {
    /// Upper bound on name probes for a single `start`
    #[serde(default = "default_max_probes")]
    pub max_probes: u32,
}

/// One probe per disambiguator that still sorts in creation order.
fn default_max_probes() -> u32 {
    crate::name::MAX_SORTED_DISAMBIGUATOR + 1
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_probes: default_max_probes(),
        }
    }
}

impl Config {
    /// Load configuration from a `.tasklog.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `dir`, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Task root resolved against the config file's directory
    pub fn root_in(&self, base: &Path) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            base.join(&self.root)
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "root cannot be empty".to_string(),
            ));
        }
        if self.reports.limit() == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "reports.head + reports.tail must be >= 1".to_string(),
            ));
        }
        if self.allocator.max_probes == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "allocator.max_probes must be >= 1".to_string(),
            ));
        }
        if self.allocator.max_probes > default_max_probes() {
            return Err(crate::error::Error::InvalidConfig(format!(
                "allocator.max_probes must be <= {}",
                default_max_probes()
            )));
        }
        Ok(())
    }
}
