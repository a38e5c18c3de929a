//! Task directory enumeration.
//!
//! The catalog is the only read path for "which tasks exist". It never
//! fails: an unreadable root reads as an empty root, so callers treat
//! "no tasks" and "listing error" the same way.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::name::{self, ParsedName};
use crate::storage;

/// List task directory names under `root`, sorted lexicographically.
///
/// Creates the root when it is missing. Entries whose names do not parse
/// as task directories, and anything that is not a directory (including
/// the `current` symlink), are skipped.
pub fn list_task_directories(root: &Path) -> Vec<String> {
    if let Err(err) = storage::ensure_root(root) {
        debug!(root = %root.display(), error = %err, "failed to create task root");
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(root = %root.display(), error = %err, "failed to list task root");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|file_name| name::parse_directory_name(file_name).is_some())
        .collect();
    names.sort();
    names
}

/// Catalog listing with each name already parsed.
pub fn list_parsed_tasks(root: &Path) -> Vec<ParsedName> {
    list_task_directories(root)
        .iter()
        .filter_map(|directory_name| name::parse_directory_name(directory_name))
        .collect()
}
