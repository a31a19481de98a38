use chrono::Utc;
use kanban_shared::{
    api::{ExportDocument, ImportDocument},
    default_columns,
};

use super::{Board, BoardState};
use crate::error::{Result, StoreError};
use crate::storage::KeyValueStore;

/// Parses an import document. The document must carry a `tasks` object.
pub fn parse_import(json: &str) -> Result<ImportDocument> {
    let document: ImportDocument = serde_json::from_str(json)
        .map_err(|e| StoreError::InvalidImport(format!("could not parse document: {}", e)))?;

    if document.tasks.is_none() {
        return Err(StoreError::InvalidImport(
            "document has no tasks field".to_string(),
        ));
    }

    Ok(document)
}

impl<S: KeyValueStore> Board<S> {
    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            tasks: self.state.tasks.clone(),
            ideas: self.state.ideas.clone(),
            columns: self.state.columns.clone(),
            column_names: self.state.column_names.clone(),
            task_id_counter: self.state.task_counter,
            idea_id_counter: self.state.idea_counter,
            export_date: Utc::now(),
            current_category: self.current_category.clone(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Replaces the whole board with the document's contents. On any parse
    /// error the board is left untouched.
    ///
    /// Missing counters become `entries + 1`, which can reuse ids when the
    /// imported ids were sparse.
    pub fn import(&mut self, json: &str) -> Result<()> {
        let document = parse_import(json)?;

        let tasks = document.tasks.unwrap_or_default();
        let ideas = document.ideas.unwrap_or_default();
        let task_counter = document
            .task_id_counter
            .filter(|n| *n > 0)
            .unwrap_or(tasks.len() as u64 + 1);
        let idea_counter = document
            .idea_id_counter
            .filter(|n| *n > 0)
            .unwrap_or(ideas.len() as u64 + 1);

        let imported = BoardState {
            tasks,
            ideas,
            columns: document.columns.unwrap_or_else(default_columns),
            column_names: document.column_names.unwrap_or_default(),
            task_counter,
            idea_counter,
        };

        self.mutate(move |state, _, _| {
            *state = imported;
            Some(())
        })?;

        self.selection.clear();
        if let Some(category) = document.current_category {
            self.switch_category(&category);
        }

        tracing::info!(
            tasks = self.state.tasks.len(),
            ideas = self.state.ideas.len(),
            "Imported board"
        );
        Ok(())
    }
}
