//! Task commands: current, start, switch, recent, ls.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::recent;
use crate::task::{self, TaskEntry, TaskInfo};

use super::Context;

#[derive(Serialize)]
struct RecentReport {
    tasks: Vec<String>,
}

#[derive(Serialize)]
struct ListReport {
    tasks: Vec<TaskEntry>,
}

pub fn run_current(context: &Context) -> Result<()> {
    let info = task::current_task_info(&context.root);

    let human = match &info {
        Some(info) => task_human("tasklog current", info),
        None => {
            let mut human = HumanOutput::new("tasklog current: none");
            human.push_warning("no current task");
            human.push_next_step("tasklog start <label>");
            human
        }
    };

    emit_success(context.output, "current", &info, Some(&human))
}

pub fn run_start(context: &Context, label: &str) -> Result<()> {
    let info = task::start_new_task(&context.root, label)?;
    let mut human = task_human("tasklog start", &info);
    human.push_next_step("tasklog report <suffix>");
    emit_success(context.output, "start", &info, Some(&human))
}

pub fn run_switch(context: &Context, label: &str) -> Result<()> {
    let info = task::switch_task(&context.root, label)?;
    let human = task_human("tasklog switch", &info);
    emit_success(context.output, "switch", &info, Some(&human))
}

pub fn run_recent(context: &Context) -> Result<()> {
    let tasks = recent::list_recent_tasks(&context.root);

    let window = context.root.config().recent.window_days;
    let mut human = HumanOutput::new(format!("tasklog recent: {} task(s)", tasks.len()));
    human.push_summary("window", format!("{window} days"));
    for label in &tasks {
        human.push_detail(label.clone());
    }

    emit_success(context.output, "recent", &RecentReport { tasks }, Some(&human))
}

pub fn run_ls(context: &Context) -> Result<()> {
    let tasks = task::list_tasks(&context.root);

    let mut human = HumanOutput::new(format!("tasklog ls: {} task(s)", tasks.len()));
    human.push_summary("root", context.root.path().display().to_string());
    for entry in &tasks {
        let marker = if entry.current { " (current)" } else { "" };
        human.push_detail(format!("{}{marker}", entry.directory_name));
    }

    emit_success(context.output, "ls", &ListReport { tasks }, Some(&human))
}

fn task_human(command: &str, info: &TaskInfo) -> HumanOutput {
    let mut human = HumanOutput::new(format!("{command}: {}", info.task_slug));
    human.push_summary("task", info.task_slug.clone());
    human.push_summary("directory", info.directory_name.clone());
    human.push_summary("reports dir", info.reports_dir.display().to_string());
    human.push_summary("reports", info.report_file_names.len().to_string());
    for name in &info.report_file_names {
        human.push_detail(name.clone());
    }
    human
}
