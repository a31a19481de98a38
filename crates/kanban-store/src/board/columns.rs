use std::sync::LazyLock;

use kanban_shared::{humanize_column_id, TERMINAL_COLUMN};
use regex::Regex;

use super::Board;
use crate::error::Result;
use crate::storage::KeyValueStore;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// "Code Review" -> "code-review".
pub fn column_id_from_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}

impl<S: KeyValueStore> Board<S> {
    pub fn column_display_name(&self, column_id: &str) -> String {
        self.state
            .column_names
            .get(column_id)
            .cloned()
            .unwrap_or_else(|| humanize_column_id(column_id))
    }

    /// Inserts a column just before the terminal column. An id that already
    /// exists in the category only has its display name replaced.
    pub fn add_column(&mut self, category: &str, name: &str) -> Result<Option<String>> {
        let name = name.trim();
        let column_id = column_id_from_name(name);
        if column_id.is_empty() {
            return Ok(None);
        }

        let added = self.mutate(|state, _, _| {
            let list = state.columns.get_mut(category)?;
            if !list.contains(&column_id) {
                let index = list
                    .iter()
                    .position(|c| c == TERMINAL_COLUMN)
                    .unwrap_or(list.len());
                list.insert(index, column_id.clone());
            }
            state
                .column_names
                .insert(column_id.clone(), name.to_string());
            Some(column_id)
        })?;

        if let Some(ref id) = added {
            tracing::debug!(column = %id, category, "Added column");
        }
        Ok(added)
    }

    /// Removes a column from a category. Tasks in it move to `destination`
    /// when that is another column of the same category; otherwise they keep
    /// the removed column id. The terminal column cannot be removed.
    pub fn remove_column(
        &mut self,
        category: &str,
        column_id: &str,
        destination: Option<&str>,
    ) -> Result<bool> {
        if column_id == TERMINAL_COLUMN {
            return Ok(false);
        }

        let removed = self.mutate(|state, _, now| {
            if !state.has_column(category, column_id) {
                return None;
            }

            let destination =
                destination.filter(|d| *d != column_id && state.has_column(category, d));

            if let Some(destination) = destination {
                let stranded: Vec<String> = state
                    .tasks
                    .values()
                    .filter(|t| t.column == column_id && t.category == category)
                    .map(|t| t.id.clone())
                    .collect();
                for task_id in stranded {
                    state.move_task(&task_id, destination, category, now);
                }
            }

            let list = state.columns.get_mut(category)?;
            list.retain(|c| c != column_id);
            Some(destination.is_some())
        })?;

        match removed {
            Some(migrated) => {
                tracing::debug!(column = column_id, category, migrated, "Removed column");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
