//! tasklog report command implementation
//!
//! Proposes the next report path; the caller creates the file.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::reports;

use super::Context;

pub fn run(context: &Context, suffix: &str) -> Result<()> {
    let report = reports::start_new_report_file(&context.root, suffix)?;
    let path = report.report_file_to_create.display().to_string();

    let mut human = HumanOutput::new(format!("tasklog report: {path}"));
    human.push_summary("create", path);

    emit_success(context.output, "report", &report, Some(&human))
}
