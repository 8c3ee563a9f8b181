//! Error types for agen
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (validation, unknown or ambiguous task id, bad args)
//! - 4: Operation failed (filesystem, corrupt record, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the agen CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for agen operations
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors (exit code 2)
    #[error("title too short (min 1)")]
    TitleTooShort,

    #[error("title too long (max 255)")]
    TitleTooLong,

    #[error("description too long (max 65535)")]
    DescriptionTooLong,

    #[error("priority must be Low, Medium or High")]
    InvalidPriority(u8),

    #[error("status must be Todo, Doing or Done")]
    InvalidStatus(u8),

    // Resolution errors (exit code 2)
    #[error("Invalid task id: {0}")]
    InvalidIdentifier(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Ambiguous task id '{prefix}': matches {}", .matches.join(", "))]
    AmbiguousPrefix {
        prefix: String,
        matches: Vec<String>,
    },

    // Front-end errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Format errors (exit code 4)
    #[error("Invalid task record: {field} needs {needed} byte(s), {remaining} left")]
    TruncatedRecord {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Invalid task record: {field} is not valid UTF-8")]
    InvalidText { field: &'static str },

    #[error("Invalid task record: identifier '{0}' cannot name a task file")]
    InvalidRecordIdentifier(String),

    // Path / IO failures (exit code 4)
    #[error("Invalid task directory: {0}")]
    InvalidStorePath(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TitleTooShort
            | Error::TitleTooLong
            | Error::DescriptionTooLong
            | Error::InvalidPriority(_)
            | Error::InvalidStatus(_)
            | Error::InvalidIdentifier(_)
            | Error::TaskNotFound(_)
            | Error::AmbiguousPrefix { .. }
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::TruncatedRecord { .. }
            | Error::InvalidText { .. }
            | Error::InvalidRecordIdentifier(_)
            | Error::InvalidStorePath(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// True for errors raised while validating task fields.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::TitleTooShort
                | Error::TitleTooLong
                | Error::DescriptionTooLong
                | Error::InvalidPriority(_)
                | Error::InvalidStatus(_)
        )
    }

    /// True for errors raised while decoding a stored record.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::TruncatedRecord { .. }
                | Error::InvalidText { .. }
                | Error::InvalidRecordIdentifier(_)
        )
    }

    /// Structured details for JSON output
    pub fn details(&self) -> Option<serde_json::Value> {
        use serde_json::json;

        match self {
            Error::InvalidPriority(value) | Error::InvalidStatus(value) => {
                Some(json!({ "value": value }))
            }
            Error::InvalidIdentifier(id) | Error::TaskNotFound(id) => Some(json!({ "id": id })),
            Error::AmbiguousPrefix { prefix, matches } => Some(json!({
                "prefix": prefix,
                "matches": matches,
            })),
            Error::InvalidArgument(message) | Error::InvalidConfig(message) => {
                Some(json!({ "message": message }))
            }
            Error::TruncatedRecord {
                field,
                needed,
                remaining,
            } => Some(json!({
                "field": field,
                "needed": needed,
                "remaining": remaining,
            })),
            Error::InvalidText { field } => Some(json!({ "field": field })),
            Error::InvalidRecordIdentifier(id) => Some(json!({ "field": "identifier", "id": id })),
            Error::InvalidStorePath(path) | Error::LockFailed(path) => {
                Some(json!({ "path": path.to_string_lossy() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for agen operations
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
