//! Current-task pointer.
//!
//! The active task is a symlink `<root>/current` whose target is the task
//! directory name, relative to the root, so the whole tree can be moved
//! without breaking the link. A missing, dangling or malformed link reads
//! as "no current task".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::name;
use crate::storage::{current_link_path, CURRENT_LINK};

/// Resolve the current task directory name, if any.
pub fn read_current(root: &Path) -> Option<String> {
    let link = current_link_path(root);
    let target = match fs::read_link(&link) {
        Ok(target) => target,
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                debug!(link = %link.display(), error = %err, "failed to read current pointer");
            }
            return None;
        }
    };

    let directory_name = target.file_name()?.to_str()?.to_string();
    name::parse_directory_name(&directory_name)?;

    // Callers resolve the task as `<root>/<name>`, so that is what must exist.
    if !root.join(&directory_name).is_dir() {
        debug!(target = %target.display(), "current pointer is dangling");
        return None;
    }

    Some(directory_name)
}

/// Point `current` at `directory_name`.
///
/// The new link is created under a unique temporary name and renamed over
/// the old one, so readers see either the old pointer or the new one.
pub fn write_current(root: &Path, directory_name: &str) -> Result<()> {
    let link = current_link_path(root);
    let temp = temp_link_path(root);

    create_link(Path::new(directory_name), &temp).map_err(|source| Error::PointerWrite {
        path: link.clone(),
        source,
    })?;

    if let Err(first) = fs::rename(&temp, &link) {
        // Rename cannot replace a directory; clear the way and try once more.
        debug!(link = %link.display(), error = %first, "replacing current pointer by removal");
        let retried = remove_existing(&link).and_then(|_| fs::rename(&temp, &link));
        if let Err(source) = retried {
            let _ = fs::remove_file(&temp);
            return Err(Error::PointerWrite { path: link, source });
        }
    }

    info!(target = directory_name, "current task updated");
    Ok(())
}

fn temp_link_path(root: &Path) -> PathBuf {
    root.join(format!(".{CURRENT_LINK}.{}.tmp", Uuid::new_v4().simple()))
}

fn remove_existing(link: &Path) -> io::Result<()> {
    let result = match fs::symlink_metadata(link) {
        Ok(meta) if meta.is_dir() => fs::remove_dir(link),
        Ok(_) => fs::remove_file(link),
        Err(err) => Err(err),
    };
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
