use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryColumns, Idea, Task};

/// Full board snapshot written by export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: BTreeMap<String, Task>,
    pub ideas: BTreeMap<String, Idea>,
    pub columns: CategoryColumns,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_names: BTreeMap<String, String>,
    pub task_id_counter: u64,
    pub idea_id_counter: u64,
    pub export_date: DateTime<Utc>,
    pub current_category: String,
}

impl ExportDocument {
    /// Suggested file name, e.g. `taskmgr-tasks-2024-03-01.json`.
    pub fn file_name(&self) -> String {
        format!("taskmgr-tasks-{}.json", self.export_date.format("%Y-%m-%d"))
    }
}

/// Lenient reading of an export document. Only `tasks` is mandatory; the
/// importer fills everything else with initial-state defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub tasks: Option<BTreeMap<String, Task>>,
    #[serde(default)]
    pub ideas: Option<BTreeMap<String, Idea>>,
    #[serde(default)]
    pub columns: Option<CategoryColumns>,
    #[serde(default)]
    pub column_names: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub task_id_counter: Option<u64>,
    #[serde(default)]
    pub idea_id_counter: Option<u64>,
    #[serde(default)]
    pub current_category: Option<String>,
}
