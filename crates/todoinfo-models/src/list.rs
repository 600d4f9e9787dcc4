//! Task list types.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Well-known marker Graph uses for ordinary user-created lists.
///
/// Any other value (`defaultList`, `flaggedEmails`, ...) denotes a
/// system-managed list.
pub const WELLKNOWN_NONE: &str = "none";

/// Descriptor of a task list as returned by the list enumeration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListInfo {
    /// Graph identifier of the list.
    pub id: String,

    /// Display name.
    pub display_name: String,

    /// Well-known list marker.
    #[serde(default = "default_wellknown")]
    pub wellknown_list_name: String,

    /// Whether the list is shared with other users.
    #[serde(default)]
    pub is_shared: bool,
}

fn default_wellknown() -> String {
    WELLKNOWN_NONE.to_string()
}

impl TaskListInfo {
    /// Creates a descriptor for an ordinary user list.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            wellknown_list_name: default_wellknown(),
            is_shared: false,
        }
    }

    /// Sets the well-known marker.
    pub fn with_wellknown(mut self, wellknown: impl Into<String>) -> Self {
        self.wellknown_list_name = wellknown.into();
        self
    }

    /// Returns true for ordinary user lists.
    pub fn is_user_list(&self) -> bool {
        self.wellknown_list_name == WELLKNOWN_NONE
    }

    /// Builds the task list this descriptor refers to.
    pub fn into_task_list(self, tasks: Vec<Task>) -> TaskList {
        TaskList {
            name: self.display_name,
            wellknown_list_name: self.wellknown_list_name,
            is_shared: self.is_shared,
            tasks,
        }
    }
}

/// A named list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    /// Display name of the list.
    pub name: String,

    /// Well-known list marker.
    pub wellknown_list_name: String,

    /// Whether the list is shared.
    pub is_shared: bool,

    /// Tasks in Graph order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an ordinary user list.
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            wellknown_list_name: WELLKNOWN_NONE.to_string(),
            is_shared: false,
            tasks,
        }
    }

    /// Returns the number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the list has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
