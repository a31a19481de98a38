//! The board: owned in-memory collections plus the storage they persist to.
//!
//! Every mutating operation runs through `Board::mutate`, which applies the
//! change to the in-memory state and writes the collections back. Operations
//! naming a missing task, idea or column are no-ops and do not write.

mod columns;
mod comments;
mod ideas;
mod tags;
mod tasks;
mod transfer;

pub use columns::column_id_from_name;
pub use transfer::parse_import;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use kanban_shared::{
    api::TaskFilter, default_columns, CategoryColumns, Idea, Task, Theme, DEFAULT_CATEGORY,
};
use serde::de::DeserializeOwned;

use crate::dashboard::DashboardStats;
use crate::error::Result;
use crate::query::{self, TaskGroups};
use crate::storage::{self, keys, KeyValueStore, MemoryStore};
use crate::view::{self, TaskCard};

/// Everything that is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: BTreeMap<String, Task>,
    pub ideas: BTreeMap<String, Idea>,
    pub columns: CategoryColumns,
    pub column_names: BTreeMap<String, String>,
    pub task_counter: u64,
    pub idea_counter: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            ideas: BTreeMap::new(),
            columns: default_columns(),
            column_names: BTreeMap::new(),
            task_counter: 1,
            idea_counter: 1,
        }
    }
}

impl BoardState {
    pub fn has_column(&self, category: &str, column: &str) -> bool {
        self.columns
            .get(category)
            .is_some_and(|list| list.iter().any(|c| c == column))
    }

    /// One past the highest order among active tasks in the column, or 0.
    pub(crate) fn next_order(&self, column: &str, category: &str, exclude: Option<&str>) -> i64 {
        self.tasks
            .values()
            .filter(|t| {
                t.column == column
                    && t.category == category
                    && !t.archived
                    && Some(t.id.as_str()) != exclude
            })
            .map(|t| t.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub(crate) fn mint_task_id(&mut self) -> String {
        let id = format!("task-{}", self.task_counter);
        self.task_counter += 1;
        id
    }

    pub(crate) fn mint_idea_id(&mut self) -> String {
        let id = format!("idea-{}", self.idea_counter);
        self.idea_counter += 1;
        id
    }
}

pub struct Board<S: KeyValueStore> {
    storage: S,
    state: BoardState,
    theme: Theme,
    current_category: String,
    filter: TaskFilter,
    selection: BTreeSet<String>,
}

impl Board<MemoryStore> {
    pub fn in_memory() -> Self {
        Self {
            storage: MemoryStore::default(),
            state: BoardState::default(),
            theme: Theme::default(),
            current_category: DEFAULT_CATEGORY.to_string(),
            filter: TaskFilter::default(),
            selection: BTreeSet::new(),
        }
    }
}

impl<S: KeyValueStore> Board<S> {
    /// Migrate legacy keys, then load whatever `storage` holds. Missing or
    /// unreadable values start from the initial state.
    pub fn open(mut storage: S) -> Result<Self> {
        storage::migrate_legacy(&mut storage)?;

        let defaults = BoardState::default();
        let state = BoardState {
            tasks: load_json(&storage, keys::TASKS)?.unwrap_or(defaults.tasks),
            ideas: load_json(&storage, keys::IDEAS)?.unwrap_or(defaults.ideas),
            columns: load_json(&storage, keys::COLUMNS)?.unwrap_or(defaults.columns),
            column_names: load_json(&storage, keys::COLUMN_NAMES)?
                .unwrap_or(defaults.column_names),
            task_counter: load_counter(&storage, keys::TASK_COUNTER)?,
            idea_counter: load_counter(&storage, keys::IDEA_COUNTER)?,
        };
        let theme = storage::load_theme(&storage)?;

        tracing::info!(
            tasks = state.tasks.len(),
            ideas = state.ideas.len(),
            "Board loaded"
        );

        Ok(Self {
            storage,
            state,
            theme,
            current_category: DEFAULT_CATEGORY.to_string(),
            filter: TaskFilter::default(),
            selection: BTreeSet::new(),
        })
    }

    /// Apply `op` and persist. `None` from `op` means nothing happened: the
    /// state is restored and nothing is written. A failed write also restores
    /// the previous state.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut BoardState, &TaskFilter, DateTime<Utc>) -> Option<T>,
    ) -> Result<Option<T>> {
        let snapshot = self.state.clone();
        let now = Utc::now();

        let Some(value) = op(&mut self.state, &self.filter, now) else {
            self.state = snapshot;
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            tracing::error!("Failed to persist board: {}", e);
            self.state = snapshot;
            return Err(e);
        }

        Ok(Some(value))
    }

    /// Whole-collection overwrite of every persisted key, as one batch.
    fn persist(&mut self) -> Result<()> {
        let entries = [
            (keys::TASKS, serde_json::to_string(&self.state.tasks)?),
            (keys::IDEAS, serde_json::to_string(&self.state.ideas)?),
            (keys::COLUMNS, serde_json::to_string(&self.state.columns)?),
            (
                keys::COLUMN_NAMES,
                serde_json::to_string(&self.state.column_names)?,
            ),
            (keys::TASK_COUNTER, self.state.task_counter.to_string()),
            (keys::IDEA_COUNTER, self.state.idea_counter.to_string()),
        ];
        self.storage.set_many(&entries)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tasks(&self) -> &BTreeMap<String, Task> {
        &self.state.tasks
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.state.tasks.get(task_id)
    }

    pub fn columns_for(&self, category: &str) -> &[String] {
        self.state
            .columns
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.state.columns.keys().map(String::as_str)
    }

    // Category

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    /// Changes which category the views read from. No data changes.
    pub fn switch_category(&mut self, category: &str) {
        if self.current_category != category {
            tracing::debug!(category, "Switched category");
            self.current_category = category.to_string();
        }
    }

    // Theme

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme.toggled();
        storage::save_theme(&mut self.storage, theme)?;
        self.theme = theme;
        Ok(theme)
    }

    // Filter

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: &str) {
        self.filter.search = search.to_string();
    }

    pub fn toggle_show_archived(&mut self) -> bool {
        self.filter.show_archived = !self.filter.show_archived;
        self.filter.show_archived
    }

    // Selection

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn is_selected(&self, task_id: &str) -> bool {
        self.selection.contains(task_id)
    }

    /// Returns whether the task is selected afterwards.
    pub fn toggle_selection(&mut self, task_id: &str) -> bool {
        if !self.state.tasks.contains_key(task_id) {
            return false;
        }
        if self.selection.remove(task_id) {
            false
        } else {
            self.selection.insert(task_id.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Views

    pub fn grouped_view(&self) -> TaskGroups<'_> {
        TaskGroups::build(self.state.tasks.values(), &self.filter)
    }

    pub fn column_counts(&self) -> BTreeMap<(String, String), usize> {
        self.grouped_view().counts()
    }

    pub fn available_tags(&self, category: &str) -> BTreeSet<String> {
        query::available_tags(self.state.tasks.values(), category)
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::for_category(self.state.tasks.values(), &self.current_category)
    }

    /// Visible cards of one column in display order.
    pub fn cards(&self, category: &str, column: &str, now: DateTime<Utc>) -> Vec<TaskCard> {
        self.grouped_view()
            .column(category, column)
            .iter()
            .map(|task| view::task_card(task, &self.state.tasks, &self.selection, now))
            .collect()
    }
}

fn load_json<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value unreadable, using defaults");
            Ok(None)
        }
    }
}

fn load_counter<S: KeyValueStore>(storage: &S, key: &str) -> Result<u64> {
    let counter = storage
        .get(key)?
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1);
    Ok(counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    /// Storage that accepts reads but refuses every write.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Storage("read-only".to_string()))
        }

        fn set_many(&mut self, _entries: &[(&str, String)]) -> Result<()> {
            Err(StoreError::Storage("read-only".to_string()))
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    /// Storage that refuses anything touching the columns key.
    #[derive(Default)]
    struct ColumnsRejectingStore(MemoryStore);

    impl KeyValueStore for ColumnsRejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if key == keys::COLUMNS {
                return Err(StoreError::Storage("columns rejected".to_string()));
            }
            self.0.set(key, value)
        }

        fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
            if entries.iter().any(|(key, _)| *key == keys::COLUMNS) {
                return Err(StoreError::Storage("columns rejected".to_string()));
            }
            self.0.set_many(entries)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_open_empty_storage_uses_initial_state() {
        let board = Board::open(MemoryStore::default()).unwrap();
        assert_eq!(board.state(), &BoardState::default());
        assert_eq!(board.current_category(), "personal");
        assert_eq!(board.theme(), Theme::Dark);
    }

    #[test]
    fn test_unreadable_values_fall_back() {
        let mut storage = MemoryStore::default();
        storage.set(keys::TASKS, "{broken").unwrap();
        storage.set(keys::TASK_COUNTER, "abc").unwrap();
        storage.set(keys::IDEA_COUNTER, "7").unwrap();

        let board = Board::open(storage).unwrap();
        assert!(board.tasks().is_empty());
        assert_eq!(board.state().task_counter, 1);
        assert_eq!(board.state().idea_counter, 7);
    }

    #[test]
    fn test_failed_write_restores_state() {
        let mut board = Board::open(ReadOnlyStore::default()).unwrap();

        let result = board.create_idea("Buy milk", "personal");
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(board.state().ideas.is_empty());
        assert_eq!(board.state().idea_counter, 1);
    }

    #[test]
    fn test_failed_write_leaves_storage_untouched() {
        let mut board = Board::open(ColumnsRejectingStore::default()).unwrap();
        assert!(board.create_idea("Buy milk", "personal").is_err());
        assert!(board.storage().0.is_empty());

        // A board reopened from the same storage must not reuse ids over
        // anything half-written.
        let mut reopened = Board::open(board.storage().0.clone()).unwrap();
        assert!(reopened.state().ideas.is_empty());
        assert_eq!(reopened.state().idea_counter, 1);

        reopened.create_idea("Call mum", "personal").unwrap();
        reopened.create_idea("Buy milk", "personal").unwrap();
        assert_eq!(reopened.state().ideas.len(), 2);
    }

    #[test]
    fn test_noop_does_not_write() {
        let mut board = Board::open(MemoryStore::default()).unwrap();
        assert!(!board.delete_task("task-404").unwrap());
        assert!(board.storage().is_empty());
    }

    #[test]
    fn test_toggle_selection_ignores_unknown_tasks() {
        let mut board = Board::in_memory();
        let id = board.create_task("personal", "waiting").unwrap().unwrap();

        assert!(!board.toggle_selection("task-404"));
        assert!(board.toggle_selection(&id));
        assert!(board.is_selected(&id));
        assert!(!board.toggle_selection(&id));
        assert!(board.selection().is_empty());
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut board = Board::open(MemoryStore::default()).unwrap();
        assert_eq!(board.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(
            board.storage().get(keys::THEME).unwrap().as_deref(),
            Some("light")
        );
    }
}
