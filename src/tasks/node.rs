//! Task hierarchy nodes
//!
//! Categories group leaves; only leaves carry a [`CommandDescriptor`]. The
//! two kinds have separate constructors so a node's command is present
//! exactly when it is a leaf.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::record::TaskRecord;

/// Everything an external executor needs to launch a task later
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// Directory containing the commands file
    pub root_dir: PathBuf,
    /// Resolved working directory, possibly relative to `root_dir`
    pub working_dir: PathBuf,
    pub file_name: String,
    pub arguments: String,
}

impl CommandDescriptor {
    /// Command line as a single display string
    pub fn command_line(&self) -> String {
        if self.arguments.is_empty() {
            self.file_name.clone()
        } else {
            format!("{} {}", self.file_name, self.arguments)
        }
    }

    /// Working directory anchored at the root directory
    pub fn effective_working_dir(&self) -> PathBuf {
        self.root_dir.join(&self.working_dir)
    }
}

/// Node in the presented task tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNode {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TaskNode>,
    is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<CommandDescriptor>,
}

impl TaskNode {
    /// Grouping node without a command
    pub fn category(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            children: vec![],
            is_leaf: false,
            command: None,
        }
    }

    /// Runnable node
    pub fn leaf(
        name: impl Into<String>,
        description: impl Into<String>,
        command: CommandDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            children: vec![],
            is_leaf: true,
            command: Some(command),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn children(&self) -> &[TaskNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn command(&self) -> Option<&CommandDescriptor> {
        self.command.as_ref()
    }

    /// Append a child; ignored on leaves
    pub(crate) fn push_child(&mut self, child: TaskNode) {
        if self.is_leaf {
            tracing::warn!("Refusing to add '{}' under leaf '{}'", child.name, self.name);
            return;
        }
        self.children.push(child);
    }

    /// All leaves below this node, depth-first in presentation order
    pub fn leaves(&self) -> Vec<&TaskNode> {
        let mut leaves = Vec::new();
        let mut stack: Vec<&TaskNode> = vec![self];

        while let Some(node) = stack.pop() {
            if node.is_leaf {
                leaves.push(node);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }

        leaves
    }

    /// First leaf with the given name
    pub fn find_leaf(&self, name: &str) -> Option<&TaskNode> {
        self.leaves().into_iter().find(|leaf| leaf.name == name)
    }
}

/// Fixed two-line description showing the raw record values
pub fn describe(record: &TaskRecord) -> String {
    format!(
        "Filename:\t {}\nArguments:\t {}",
        record.file_name, record.arguments
    )
}

/// Wrap a resolved task into a leaf node
///
/// The working directory falls back to `root_dir` when the record has none.
pub fn make_leaf(
    record: &TaskRecord,
    resolved_name: String,
    resolved_working_dir: Option<String>,
    root_dir: &Path,
) -> TaskNode {
    let working_dir = resolved_working_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| root_dir.to_path_buf());

    TaskNode::leaf(
        resolved_name,
        describe(record),
        CommandDescriptor {
            root_dir: root_dir.to_path_buf(),
            working_dir,
            file_name: record.file_name.clone(),
            arguments: record.arguments.clone(),
        },
    )
}
