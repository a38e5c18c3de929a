//! Error types for tasklog
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (empty label/suffix, bad config)
//! - 3: Not found (no current task, no task with that label)
//! - 4: Operation failed (directory or pointer mutation failed)
//!
//! Read-path failures (listing the root, resolving the pointer) never
//! reach this type; they collapse to empty values at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tasklog CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tasklog operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Not found (exit code 3)
    #[error("No current task")]
    NoCurrentTask,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Operation failures (exit code 4)
    #[error("Task directory already exists: {0}")]
    DirectoryConflict(PathBuf),

    #[error("Failed to create task directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to update current pointer {path}: {source}")]
    PointerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free task name for '{label}' after {probes} attempts")]
    AllocatorExhausted { label: String, probes: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::NoCurrentTask | Error::TaskNotFound(_) => exit_codes::NOT_FOUND,

            Error::DirectoryConflict(_)
            | Error::DirectoryCreate { .. }
            | Error::PointerWrite { .. }
            | Error::AllocatorExhausted { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Whether retrying the same call may succeed.
    ///
    /// True for failed mutations: a lost allocation race or a pointer
    /// replace that hit a transient filesystem error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::DirectoryConflict(_) | Error::DirectoryCreate { .. } | Error::PointerWrite { .. }
        )
    }

    /// Structured fields for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidArgument(message) | Error::InvalidConfig(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::TaskNotFound(label) => Some(serde_json::json!({ "label": label })),
            Error::DirectoryConflict(path) => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "retryable": true,
            })),
            Error::DirectoryCreate { path, .. } | Error::PointerWrite { path, .. } => {
                Some(serde_json::json!({
                    "path": path.to_string_lossy(),
                    "retryable": true,
                }))
            }
            Error::AllocatorExhausted { label, probes } => Some(serde_json::json!({
                "label": label,
                "probes": probes,
            })),
            _ => None,
        }
    }
}

/// Result type alias for tasklog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
