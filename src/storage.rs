//! The task root handle
//!
//! Every operation takes a [`TaskRoot`] instead of reaching for the
//! process working directory. The handle carries the root path, the
//! day the call treats as "today", and the loaded configuration.
//!
//! # Directory Structure
//!
//! ```text
//! <root>/                                   # created on demand
//!   current -> <directory_name>             # relative symlink, optional
//!   <directory_name>/                       # one per task
//!     <digits>-<suffix>.md                  # one per report
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::config::Config;

/// Name of the current-task pointer inside the root
pub const CURRENT_LINK: &str = "current";

/// Handle on a task root
#[derive(Debug, Clone)]
pub struct TaskRoot {
    root: PathBuf,
    today: NaiveDate,
    config: Config,
}

impl TaskRoot {
    /// Task root at `root` with default configuration and the local date
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, Config::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            today: Local::now().date_naive(),
            config,
        }
    }

    /// Pin the day used for naming and recency
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path to the current-task pointer
    pub fn current_link(&self) -> PathBuf {
        current_link_path(&self.root)
    }

    /// Path to a task directory by name
    pub fn task_dir(&self, directory_name: &str) -> PathBuf {
        self.root.join(directory_name)
    }
}

/// Path to the current-task pointer under `root`
pub fn current_link_path(root: &Path) -> PathBuf {
    root.join(CURRENT_LINK)
}

/// Create the root if missing.
///
/// Returns `true` if the directory was created by this call.
pub fn ensure_root(root: &Path) -> io::Result<bool> {
    if root.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(root)?;
    Ok(true)
}
