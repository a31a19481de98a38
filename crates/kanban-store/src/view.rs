//! Render-ready projections of tasks, independent of any front end.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use kanban_shared::{Priority, Task};
use serde::Serialize;

use crate::dashboard::time_in_column;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStatus {
    pub id: String,
    pub content: String,
    /// The dependency sits in the terminal column.
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    pub id: String,
    pub content: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
    pub comment_count: usize,
    pub dependencies: Vec<DependencyStatus>,
    pub days_in_column: i64,
    pub created_on: NaiveDate,
    pub archived: bool,
    pub selected: bool,
}

impl TaskCard {
    /// At least one dependency is not finished yet.
    pub fn is_blocked(&self) -> bool {
        self.dependencies.iter().any(|d| !d.satisfied)
    }
}

pub fn dependency_statuses(task: &Task, tasks: &BTreeMap<String, Task>) -> Vec<DependencyStatus> {
    task.dependencies
        .iter()
        .filter_map(|id| tasks.get(id))
        .map(|dep| DependencyStatus {
            id: dep.id.clone(),
            content: dep.content.clone(),
            satisfied: dep.is_done(),
        })
        .collect()
}

pub fn task_card(
    task: &Task,
    tasks: &BTreeMap<String, Task>,
    selection: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> TaskCard {
    TaskCard {
        id: task.id.clone(),
        content: task.content.clone(),
        priority: task.priority,
        tags: task.tags.clone(),
        subtasks_done: task.completed_subtasks(),
        subtasks_total: task.subtasks.len(),
        comment_count: task.comments.len(),
        dependencies: dependency_statuses(task, tasks),
        days_in_column: time_in_column(task, now),
        created_on: task.created_at.date_naive(),
        archived: task.archived,
        selected: selection.contains(&task.id),
    }
}
