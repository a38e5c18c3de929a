//! tasklog CLI
//!
//! Names task directories and report files for agents, keeping all state
//! in the filesystem.

use clap::Parser;
use tasklog::cli::Cli;
use tasklog::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via TASKLOG_LOG (or RUST_LOG).
    // Ignore invalid/huge filters so a bad env never blocks a command.
    let filter = std::env::var("TASKLOG_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = infer_command_name_from_args();
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(&command, &err, json);
        std::process::exit(err.exit_code());
    }
}
