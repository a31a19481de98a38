use serde::{Deserialize, Serialize};

use crate::models::Priority;

/// Transient view filter. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Case-insensitive substring matched against content, subtasks and comments.
    #[serde(default)]
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub show_archived: bool,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.priority.is_some() || self.tag.is_some()
    }
}
