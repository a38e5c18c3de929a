//! Recently started tasks.

use chrono::{Days, NaiveDate};

use crate::catalog;
use crate::storage::TaskRoot;

/// Labels of tasks dated within the recent window, in catalog order.
///
/// The window is inclusive: with the default 30 days, a task dated
/// exactly 30 days before today is still listed.
pub fn list_recent_tasks(root: &TaskRoot) -> Vec<String> {
    let cutoff = window_start(root.today(), root.config().recent.window_days);
    catalog::list_parsed_tasks(root.path())
        .into_iter()
        .filter(|parsed| parsed.date() >= cutoff)
        .map(|parsed| parsed.label)
        .collect()
}

fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn dated(days_ago: u64, suffix: &str, label: &str) -> String {
        let date = day().checked_sub_days(Days::new(days_ago)).unwrap();
        format!("{}{suffix}-{label}", date.format("%Y-%m-%d"))
    }

    #[test]
    fn window_is_inclusive_of_boundary() {
        let temp = TempDir::new().unwrap();
        for name in [
            dated(40, "", "old"),
            dated(31, "", "just-outside"),
            dated(30, "", "boundary"),
            dated(10, "", "recent"),
            dated(10, "b", "recent-again"),
            dated(0, "z027", "today"),
            "scratch".to_string(),
        ] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }
        let root = TaskRoot::new(temp.path()).with_today(day());

        assert_eq!(
            list_recent_tasks(&root),
            vec!["boundary", "recent", "recent-again", "today"]
        );
    }

    #[test]
    fn empty_root_has_no_recent_tasks() {
        let temp = TempDir::new().unwrap();
        let root = TaskRoot::new(temp.path().join("none")).with_today(day());
        assert!(list_recent_tasks(&root).is_empty());
    }

    #[test]
    fn huge_window_keeps_everything() {
        assert_eq!(window_start(day(), u32::MAX), NaiveDate::MIN);
    }
}
