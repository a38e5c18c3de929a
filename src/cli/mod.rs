//! Command-line interface for tasklog
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command family is implemented in its own submodule.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::storage::TaskRoot;

mod report;
mod task;

/// tasklog - filesystem-backed task and report numbering
///
/// Names day-scoped task directories, tracks the current task with a
/// symlink, and proposes the next report file name for agents.
#[derive(Parser, Debug)]
#[command(name = "tasklog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task root directory (overrides `root` in the config file)
    #[arg(long, global = true, env = "TASKLOG_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to the config file (defaults to ./.tasklog.toml)
    #[arg(long, global = true, env = "TASKLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Date to treat as today, YYYY-MM-DD
    #[arg(long, global = true, env = "TASKLOG_TODAY", hide = true)]
    pub today: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current task and its reports
    Current,

    /// Start a new task for today and make it current
    Start {
        /// Task label (slug), e.g. fix-login-bug
        label: String,
    },

    /// Make the most recent task with this label current
    Switch {
        /// Task label to switch to
        label: String,
    },

    /// List labels of tasks started in the recent window
    Recent,

    /// Propose the next report file name in the current task
    Report {
        /// Report suffix, e.g. plan or review
        suffix: String,
    },

    /// List every task directory
    Ls,
}

/// Resolved context shared by all commands
pub(crate) struct Context {
    pub root: TaskRoot,
    pub output: OutputOptions,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let context = self.context()?;
        match self.command {
            Commands::Current => task::run_current(&context),
            Commands::Start { label } => task::run_start(&context, &label),
            Commands::Switch { label } => task::run_switch(&context, &label),
            Commands::Recent => task::run_recent(&context),
            Commands::Ls => task::run_ls(&context),
            Commands::Report { suffix } => report::run(&context, &suffix),
        }
    }

    fn context(&self) -> Result<Context> {
        let cwd = std::env::current_dir()?;

        let (config, base) = match &self.config {
            Some(path) => {
                let config = Config::load(path)?;
                let base = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.clone());
                (config, cwd.join(base))
            }
            None => (Config::load_from_dir(&cwd), cwd.clone()),
        };

        let root_path = match &self.root {
            Some(root) => cwd.join(root),
            None => config.root_in(&base),
        };

        let mut root = TaskRoot::with_config(root_path, config);
        if let Some(raw) = &self.today {
            root = root.with_today(parse_today(raw)?);
        }

        Ok(Context {
            root,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
        })
    }
}

fn parse_today(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
        Error::InvalidArgument(format!("invalid --today '{raw}': {err} (expected YYYY-MM-DD)"))
    })
}
