#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub const TODAY: &str = "2026-10-14";

/// A scratch working directory with a task root at `./.tasks`.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.dir.path().join(".tasks")
    }

    pub fn task_dir(&self, name: &str) -> PathBuf {
        self.tasks_dir().join(name)
    }

    pub fn make_task(&self, name: &str) -> std::io::Result<PathBuf> {
        let path = self.task_dir(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn write_report(&self, task: &str, file: &str) -> std::io::Result<PathBuf> {
        let path = self.task_dir(task).join(file);
        fs::write(&path, "# report\n")?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(".tasklog.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn current_target(&self) -> Option<PathBuf> {
        fs::read_link(self.tasks_dir().join("current")).ok()
    }

    /// `tasklog` running in this directory with today pinned to [`TODAY`].
    pub fn cmd(&self) -> Command {
        let mut cmd = tasklog_cmd();
        cmd.current_dir(self.path()).env("TASKLOG_TODAY", TODAY);
        cmd
    }

    /// Run with `--json` and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json output")
    }
}

pub fn tasklog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tasklog").expect("binary");
    cmd.env_remove("TASKLOG_ROOT")
        .env_remove("TASKLOG_CONFIG")
        .env_remove("TASKLOG_TODAY")
        .env_remove("TASKLOG_LOG")
        .env_remove("RUST_LOG");
    cmd
}
