//! Error types for cmdhub
//!
//! Provides structured error types with suggestions for common issues.

use serde::Serialize;
use thiserror::Error;

/// Main error type for task discovery
#[derive(Error, Debug)]
pub enum TaskError {
    /// A task configuration source could not be read
    #[error("Failed to read task configuration {path}: {error}")]
    ConfigRead { path: String, error: String },

    /// The solution manifest is missing or malformed
    #[error("Invalid solution manifest {path}: {message}")]
    Manifest { path: String, message: String },

    /// A project tree operation referenced a node that cannot hold children
    #[error("Invalid project tree: {0}")]
    InvalidProjectTree(String),

    /// Settings error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested task not found in the hierarchy
    #[error("Task '{task}' not found")]
    TaskNotFound {
        task: String,
        available: Vec<String>,
    },

    /// The background discovery job failed to complete
    #[error("Task discovery failed: {0}")]
    Discovery(String),
}

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

impl ErrorInfo {
    fn new(err: &TaskError, error_type: &str, suggestion: Option<String>) -> Self {
        Self {
            message: err.to_string(),
            error_type: error_type.to_string(),
            suggestion,
            available: vec![],
        }
    }
}

impl From<&TaskError> for ErrorInfo {
    fn from(err: &TaskError) -> Self {
        match err {
            TaskError::ConfigRead { .. } => ErrorInfo::new(
                err,
                "config_read",
                Some("Check that the commands file is readable".to_string()),
            ),
            TaskError::Manifest { .. } => ErrorInfo::new(
                err,
                "manifest_error",
                Some("Check the solution manifest TOML syntax".to_string()),
            ),
            TaskError::InvalidProjectTree(_) => ErrorInfo::new(err, "invalid_project_tree", None),
            TaskError::Config(_) => ErrorInfo::new(
                err,
                "config_error",
                Some("Check your cmdhub configuration file".to_string()),
            ),
            TaskError::TaskNotFound { available, .. } => ErrorInfo {
                available: available.clone(),
                ..ErrorInfo::new(
                    err,
                    "task_not_found",
                    suggest_task(err_task(err), available),
                )
            },
            TaskError::Discovery(_) => ErrorInfo::new(err, "discovery_failed", None),
        }
    }
}

fn err_task(err: &TaskError) -> &str {
    match err {
        TaskError::TaskNotFound { task, .. } => task,
        _ => "",
    }
}

/// Suggest a close task name when a lookup misses
///
/// Matches case-insensitively first, then by prefix.
pub fn suggest_task(task: &str, available: &[String]) -> Option<String> {
    let wanted = task.to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    available
        .iter()
        .find(|name| name.to_lowercase() == wanted)
        .or_else(|| {
            available
                .iter()
                .find(|name| name.to_lowercase().starts_with(&wanted))
        })
        .map(|name| format!("Did you mean '{}'?", name))
}
