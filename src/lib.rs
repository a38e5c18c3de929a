//! tasklog - filesystem-backed task and report numbering
//!
//! Assigns sortable, re-discoverable names to day-scoped task directories
//! and to the numbered report files inside them, using nothing but the
//! directory tree as the system of record.
//!
//! # Core Concepts
//!
//! - **Tasks**: directories named `<date prefix>-<label>`, where the date
//!   prefix disambiguates same-day tasks (`2026-10-14`, `2026-10-14b`, ...)
//! - **Current task**: a relative symlink `<root>/current`
//! - **Reports**: `<digits>-<suffix>.md` files numbered from the highest
//!   number already present
//!
//! # Module Organization
//!
//! - `name`: directory name formatting and parsing
//! - `catalog`: task directory listing
//! - `pointer`: the current-task symlink
//! - `reports`: report listing, bounded window and numbering
//! - `task`: task allocation and switching
//! - `recent`: recency filter
//! - `storage`: the task root handle
//! - `config`: configuration loading from `.tasklog.toml`
//! - `error`: error types and result aliases
//! - `output`: human and JSON output
//! - `cli`: command-line interface using clap

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod name;
pub mod output;
pub mod pointer;
pub mod recent;
pub mod reports;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
pub use storage::TaskRoot;
pub use task::TaskInfo;
