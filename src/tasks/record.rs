//! Task records and config readers
//!
//! A [`ConfigReader`] turns a commands file into an ordered list of
//! [`TaskRecord`]s. The default [`JsonConfigReader`] reads:
//!
//! ```json
//! {
//!   "commands": {
//!     "Build": { "fileName": "cargo", "arguments": "build", "workingDirectory": "$(SolutionDir)" }
//!   }
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// One command entry from a config source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Display name, may contain macros
    #[serde(default)]
    pub name: String,
    /// Executable or script to launch
    #[serde(default)]
    pub file_name: String,
    /// Argument string passed to the executable
    #[serde(default)]
    pub arguments: String,
    /// Working directory, may contain macros; defaults to the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

impl TaskRecord {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            arguments: arguments.into(),
            working_directory: None,
        }
    }

    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }
}

/// Reads task records from a config source
///
/// `Ok(None)` means the source is absent and its category is skipped.
/// `Err` is a fatal condition and is propagated to the caller unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigReader: Send + Sync {
    fn load_tasks(&self, path: &Path) -> Result<Option<Vec<TaskRecord>>, TaskError>;
}

#[derive(Debug, Deserialize)]
struct CommandsDocument {
    #[serde(default)]
    commands: serde_json::Map<String, serde_json::Value>,
}

/// Reader for the JSON `commands` document format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigReader;

impl JsonConfigReader {
    /// Parse a document; `None` when the content is not a valid commands file
    pub fn parse(content: &str) -> Option<Vec<TaskRecord>> {
        let document: CommandsDocument = match serde_json::from_str(content) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Invalid commands document: {}", e);
                return None;
            }
        };

        let mut records = Vec::with_capacity(document.commands.len());
        for (name, value) in document.commands {
            match serde_json::from_value::<TaskRecord>(value) {
                Ok(record) => records.push(TaskRecord { name, ..record }),
                Err(e) => {
                    tracing::warn!("Invalid command '{}': {}", name, e);
                    return None;
                }
            }
        }

        Some(records)
    }
}

impl ConfigReader for JsonConfigReader {
    fn load_tasks(&self, path: &Path) -> Result<Option<Vec<TaskRecord>>, TaskError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No commands file at: {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(TaskError::ConfigRead {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })
            }
        };

        tracing::debug!("Loading commands from: {}", path.display());
        let records = Self::parse(&content);
        if records.is_none() {
            tracing::warn!("Ignoring malformed commands file: {}", path.display());
        }
        Ok(records)
    }
}
