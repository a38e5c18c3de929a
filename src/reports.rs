//! Report listing and numbering.
//!
//! Reports are files named `<digits>-<suffix>.md` inside a task directory.
//! Agents write them directly, so widths vary (`7-x.md`, `007-x.md` and
//! `1000-x.md` can sit side by side) and numbers may repeat or skip.
//!
//! Two views are kept apart on purpose:
//! - [`list_reports`] is a lexicographic listing, truncated to a bounded
//!   window for display.
//! - [`next_report_number`] scans the full listing and works on parsed
//!   numbers, never on list position.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::ReportsConfig;
use crate::error::{Error, Result};
use crate::storage::TaskRoot;
use crate::task;

const REPORT_EXTENSION: &str = ".md";

/// Whether `name` matches `^\d+-.*\.md$`.
pub fn is_report_file_name(name: &str) -> bool {
    let digits = leading_digits(name);
    if digits.is_empty() {
        return false;
    }
    name[digits.len()..]
        .strip_prefix('-')
        .map(|rest| rest.ends_with(REPORT_EXTENSION))
        .unwrap_or(false)
}

/// Every report in `task_dir`, sorted lexicographically.
pub fn list_all_reports(task_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(task_dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %task_dir.display(), error = %err, "failed to list reports");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_report_file_name(name))
        .collect();
    names.sort();
    names
}

/// Reports in `task_dir` under the default 20 + 30 window.
pub fn list_reports(task_dir: &Path) -> Vec<String> {
    list_reports_with(task_dir, &ReportsConfig::default())
}

pub fn list_reports_with(task_dir: &Path, window: &ReportsConfig) -> Vec<String> {
    bounded_window(list_all_reports(task_dir), window.head, window.tail)
}

/// Keep `names` whole if it fits in `head + tail`, otherwise keep the
/// first `head` and the last `tail` entries.
pub fn bounded_window(mut names: Vec<String>, head: usize, tail: usize) -> Vec<String> {
    if names.len() <= head + tail {
        return names;
    }
    let tail_start = names.len() - tail;
    names.drain(head..tail_start);
    names
}

/// The number a newly proposed report should carry in `task_dir`.
///
/// One past the highest number present, or 1 for an empty directory.
/// Numbers too large for `u64` count as 0.
pub fn next_report_number(task_dir: &Path) -> u64 {
    list_all_reports(task_dir)
        .iter()
        .map(|name| leading_number(name))
        .max()
        .map_or(1, |high| high.saturating_add(1))
}

/// `001-suffix.md` below 1000, plain digits from there on.
pub fn format_report_file_name(number: u64, suffix: &str) -> String {
    format!("{number:03}-{suffix}{REPORT_EXTENSION}")
}

/// Path a caller should create for its next report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReport {
    pub report_file_to_create: PathBuf,
}

/// Name the next report of the current task. Nothing is written.
pub fn start_new_report_file(root: &TaskRoot, suffix: &str) -> Result<NewReport> {
    let suffix = task::require_path_component(suffix, "suffix")?;
    let info = task::current_task_info(root).ok_or(Error::NoCurrentTask)?;

    let number = next_report_number(&info.reports_dir);
    let file_name = format_report_file_name(number, suffix);
    debug!(task = %info.directory_name, file = %file_name, "proposed report file");

    Ok(NewReport {
        report_file_to_create: info.reports_dir.join(file_name),
    })
}

fn leading_digits(name: &str) -> &str {
    let end = name
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(name.len());
    &name[..end]
}

fn leading_number(name: &str) -> u64 {
    leading_digits(name).parse().unwrap_or(0)
}
