use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, TERMINAL_COLUMN};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: format!("subtask-{}", Uuid::new_v4().simple()),
            content: content.into(),
            completed: false,
        }
    }
}

/// One entry of a task's column transition log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    pub column: String,
    pub timestamp: DateTime<Utc>,
}

/// A card on the board.
///
/// Collection fields are always present (possibly empty) so stored documents
/// written before a field existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    pub column: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub column_history: Vec<ColumnChange>,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a fresh task with its initial history entry already recorded.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        column: impl Into<String>,
        order: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let column = column.into();
        Self {
            id: id.into(),
            content: content.into(),
            category: category.into(),
            column_history: vec![ColumnChange {
                column: column.clone(),
                timestamp: now,
            }],
            column,
            priority: Priority::default(),
            order,
            subtasks: Vec::new(),
            comments: Vec::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_done(&self) -> bool {
        self.column == TERMINAL_COLUMN
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn record_column_change(&mut self, column: &str, now: DateTime<Utc>) {
        self.column_history.push(ColumnChange {
            column: column.to_string(),
            timestamp: now,
        });
    }

    /// Timestamp the task entered its current column.
    pub fn entered_column_at(&self) -> DateTime<Utc> {
        self.column_history
            .last()
            .map(|change| change.timestamp)
            .unwrap_or(self.created_at)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }
}
