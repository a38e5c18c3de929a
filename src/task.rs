//! Task allocation and the current task.
//!
//! A task is started by probing date prefixes for today in disambiguator
//! order (`2026-10-14-x`, `2026-10-14b-x`, ...) against a fresh catalog
//! listing and creating the first free one. The probe is the only
//! collision guard; it assumes one allocation in flight at a time.
//! Directory creation is exclusive, so losing a race to another process
//! surfaces as [`Error::DirectoryConflict`] rather than adopting its task.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog;
use crate::error::{Error, Result};
use crate::name;
use crate::pointer;
use crate::reports;
use crate::storage::TaskRoot;

/// The current (or just started) task and its visible reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    pub task_slug: String,
    pub directory_name: String,
    pub reports_dir: PathBuf,
    pub report_file_names: Vec<String>,
}

/// One catalog entry as shown by `tasklog ls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    pub directory_name: String,
    pub label: String,
    pub date: NaiveDate,
    pub disambiguator: u32,
    pub current: bool,
}

/// Info for the task `current` points at, or `None`.
pub fn current_task_info(root: &TaskRoot) -> Option<TaskInfo> {
    let directory_name = pointer::read_current(root.path())?;
    task_info(root, &directory_name)
}

/// Start a new task labelled `label` for today and make it current.
pub fn start_new_task(root: &TaskRoot, label: &str) -> Result<TaskInfo> {
    let label = require_path_component(label, "label")?;
    let today = root.today();
    let max_probes = root.config().allocator.max_probes;

    for disambiguator in 0..max_probes {
        let prefix = name::format_date_prefix(today, disambiguator);
        let directory_name = name::directory_name(&prefix, label);

        // Re-list on every probe; another allocation may have landed.
        let existing = catalog::list_task_directories(root.path());
        if existing.iter().any(|entry| *entry == directory_name) {
            debug!(name = %directory_name, "task name taken");
            continue;
        }

        create_task_dir(root, &directory_name)?;
        pointer::write_current(root.path(), &directory_name)?;
        info!(name = %directory_name, "started task");

        return Ok(TaskInfo {
            task_slug: label.to_string(),
            reports_dir: root.task_dir(&directory_name),
            directory_name,
            report_file_names: Vec::new(),
        });
    }

    Err(Error::AllocatorExhausted {
        label: label.to_string(),
        probes: max_probes,
    })
}

/// Make the most recent task labelled `label` current.
///
/// Never creates a directory; an unknown label leaves the pointer alone.
pub fn switch_task(root: &TaskRoot, label: &str) -> Result<TaskInfo> {
    let label = require_path_component(label, "label")?;

    let target = catalog::list_parsed_tasks(root.path())
        .into_iter()
        .rev()
        .find(|parsed| parsed.label == label)
        .ok_or_else(|| Error::TaskNotFound(label.to_string()))?;

    let directory_name = target.directory_name();
    pointer::write_current(root.path(), &directory_name)?;
    info!(name = %directory_name, "switched task");

    Ok(build_info(root, &directory_name, target.label))
}

/// Every task in catalog order, flagged with the current one.
pub fn list_tasks(root: &TaskRoot) -> Vec<TaskEntry> {
    let current = pointer::read_current(root.path());
    catalog::list_parsed_tasks(root.path())
        .into_iter()
        .map(|parsed| {
            let directory_name = parsed.directory_name();
            TaskEntry {
                current: current.as_deref() == Some(directory_name.as_str()),
                date: parsed.date(),
                disambiguator: parsed.disambiguator(),
                label: parsed.label,
                directory_name,
            }
        })
        .collect()
}

/// Reject empty values and values that would not stay a single path
/// component once joined into a file or directory name.
pub(crate) fn require_path_component<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{field} cannot be empty")));
    }
    if value.contains('/') || value.contains('\\') || value.contains('\0') {
        return Err(Error::InvalidArgument(format!(
            "{field} cannot contain path separators: '{value}'"
        )));
    }
    Ok(value)
}

fn task_info(root: &TaskRoot, directory_name: &str) -> Option<TaskInfo> {
    let parsed = name::parse_directory_name(directory_name)?;
    Some(build_info(root, directory_name, parsed.label))
}

fn build_info(root: &TaskRoot, directory_name: &str, label: String) -> TaskInfo {
    let reports_dir = root.task_dir(directory_name);
    let report_file_names = reports::list_reports_with(&reports_dir, &root.config().reports);
    TaskInfo {
        task_slug: label,
        directory_name: directory_name.to_string(),
        reports_dir,
        report_file_names,
    }
}

fn create_task_dir(root: &TaskRoot, directory_name: &str) -> Result<()> {
    let path = root.task_dir(directory_name);
    fs::create_dir(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            Error::DirectoryConflict(path.clone())
        } else {
            Error::DirectoryCreate {
                path: path.clone(),
                source,
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn setup() -> (TempDir, TaskRoot) {
        let temp = TempDir::new().unwrap();
        let root = TaskRoot::new(temp.path().join("tasks")).with_today(day());
        (temp, root)
    }

    #[test]
    fn no_current_task_on_fresh_root() {
        let (_temp, root) = setup();
        assert_eq!(current_task_info(&root), None);
    }

    #[test]
    fn start_twice_same_day_disambiguates() {
        let (_temp, root) = setup();

        let first = start_new_task(&root, "x").unwrap();
        let second = start_new_task(&root, "x").unwrap();

        assert_eq!(first.directory_name, "2026-10-14-x");
        assert_eq!(second.directory_name, "2026-10-14b-x");
        assert!(root.task_dir("2026-10-14-x").is_dir());
        assert!(root.task_dir("2026-10-14b-x").is_dir());

        let current = current_task_info(&root).unwrap();
        assert_eq!(current, second);
        assert_eq!(current.task_slug, "x");
    }

    #[test]
    fn start_skips_names_written_out_of_band() {
        let (_temp, root) = setup();
        fs::create_dir_all(root.task_dir("2026-10-14-x")).unwrap();
        fs::create_dir_all(root.task_dir("2026-10-14b-x")).unwrap();

        let info = start_new_task(&root, "x").unwrap();
        assert_eq!(info.directory_name, "2026-10-14c-x");
    }

    #[test]
    fn start_different_labels_share_no_suffix() {
        let (_temp, root) = setup();

        start_new_task(&root, "x").unwrap();
        let other = start_new_task(&root, "y").unwrap();

        assert_eq!(other.directory_name, "2026-10-14-y");
    }

    #[test]
    fn start_rejects_empty_label_without_touching_disk() {
        let (_temp, root) = setup();

        let err = start_new_task(&root, "").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(matches!(
            start_new_task(&root, "a/b").unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(!root.path().exists());
    }

    #[test]
    fn start_reports_exhaustion() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.allocator.max_probes = 2;
        let root = TaskRoot::with_config(temp.path().join("tasks"), config).with_today(day());

        start_new_task(&root, "x").unwrap();
        start_new_task(&root, "x").unwrap();
        let err = start_new_task(&root, "x").unwrap_err();

        assert!(matches!(err, Error::AllocatorExhausted { probes: 2, .. }));
        assert_eq!(
            current_task_info(&root).unwrap().directory_name,
            "2026-10-14b-x"
        );
    }

    #[test]
    fn default_guard_stops_before_unsorted_prefixes() {
        let (_temp, root) = setup();
        for idx in 0..=name::MAX_SORTED_DISAMBIGUATOR {
            let prefix = name::format_date_prefix(day(), idx);
            fs::create_dir_all(root.task_dir(&name::directory_name(&prefix, "x"))).unwrap();
        }

        let err = start_new_task(&root, "x").unwrap_err();

        assert!(matches!(err, Error::AllocatorExhausted { probes: 998, .. }));
        assert!(!root.task_dir("2026-10-14z1000-x").exists());
        assert_eq!(
            switch_task(&root, "x").unwrap().directory_name,
            "2026-10-14z999-x"
        );
    }

    #[test]
    fn start_conflicts_with_non_directory_entry() {
        let (_temp, root) = setup();
        fs::create_dir_all(root.path()).unwrap();
        fs::write(root.task_dir("2026-10-14-x"), "squatter").unwrap();

        let err = start_new_task(&root, "x").unwrap_err();
        assert!(matches!(err, Error::DirectoryConflict(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn switch_picks_latest_matching_label() {
        let (_temp, root) = setup();
        fs::create_dir_all(root.task_dir("2026-09-01-x")).unwrap();
        fs::create_dir_all(root.task_dir("2026-09-02c-x")).unwrap();
        fs::create_dir_all(root.task_dir("2026-09-03-X")).unwrap();
        start_new_task(&root, "other").unwrap();

        let info = switch_task(&root, "x").unwrap();

        assert_eq!(info.directory_name, "2026-09-02c-x");
        assert_eq!(
            pointer::read_current(root.path()).as_deref(),
            Some("2026-09-02c-x")
        );
    }

    #[test]
    fn switch_to_unknown_label_keeps_pointer() {
        let (_temp, root) = setup();
        start_new_task(&root, "x").unwrap();

        let err = switch_task(&root, "missing").unwrap_err();

        assert!(matches!(err, Error::TaskNotFound(ref label) if label == "missing"));
        assert_eq!(
            pointer::read_current(root.path()).as_deref(),
            Some("2026-10-14-x")
        );
        assert_eq!(catalog::list_task_directories(root.path()).len(), 1);
    }

    #[test]
    fn current_info_lists_reports() {
        let (_temp, root) = setup();
        let info = start_new_task(&root, "x").unwrap();
        fs::write(info.reports_dir.join("002-b.md"), "").unwrap();
        fs::write(info.reports_dir.join("001-a.md"), "").unwrap();
        fs::write(info.reports_dir.join("scratch.txt"), "").unwrap();

        let current = current_task_info(&root).unwrap();
        assert_eq!(current.report_file_names, vec!["001-a.md", "002-b.md"]);
    }

    #[test]
    fn current_info_none_after_directory_removed() {
        let (_temp, root) = setup();
        let info = start_new_task(&root, "x").unwrap();
        fs::remove_dir(&info.reports_dir).unwrap();

        assert_eq!(current_task_info(&root), None);
    }

    #[test]
    fn list_tasks_marks_current() {
        let (_temp, root) = setup();
        start_new_task(&root, "a").unwrap();
        start_new_task(&root, "b").unwrap();

        let tasks = list_tasks(&root);
        assert_eq!(tasks.len(), 2);
        assert!(!tasks[0].current);
        assert!(tasks[1].current);
        assert_eq!(tasks[1].label, "b");
        assert_eq!(tasks[1].date, day());
    }
}
