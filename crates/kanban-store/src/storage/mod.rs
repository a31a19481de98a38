//! Durable string key-value storage.
//!
//! The board persists each collection under its own namespaced key as a JSON
//! string. Implementations are synchronous and overwrite whole values.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use kanban_shared::Theme;

use crate::error::Result;

/// Port the board persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Writes every entry or none of them.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Key suffixes shared by the current and legacy namespaces.
const KEY_SUFFIXES: [&str; 5] = ["tasks", "ideas", "columns", "task-counter", "idea-counter"];

const NAMESPACE: &str = "taskmgr";
const LEGACY_NAMESPACE: &str = "sara";

pub mod keys {
    pub const TASKS: &str = "taskmgr-tasks";
    pub const IDEAS: &str = "taskmgr-ideas";
    pub const COLUMNS: &str = "taskmgr-columns";
    pub const COLUMN_NAMES: &str = "taskmgr-column-names";
    pub const TASK_COUNTER: &str = "taskmgr-task-counter";
    pub const IDEA_COUNTER: &str = "taskmgr-idea-counter";
    /// Not namespaced and untouched by migration.
    pub const THEME: &str = "theme";
}

/// Copies values from the legacy namespace into the current one where the
/// current key is still absent, then drops every legacy key.
///
/// Returns the number of values carried over.
pub fn migrate_legacy<S: KeyValueStore + ?Sized>(storage: &mut S) -> Result<usize> {
    let mut migrated = 0;

    for suffix in KEY_SUFFIXES {
        let current = format!("{NAMESPACE}-{suffix}");
        let legacy = format!("{LEGACY_NAMESPACE}-{suffix}");

        if storage.get(&current)?.is_none() {
            if let Some(value) = storage.get(&legacy)? {
                storage.set(&current, &value)?;
                migrated += 1;
            }
        }

        storage.remove(&legacy)?;
    }

    if migrated > 0 {
        tracing::info!(migrated, "Migrated legacy storage keys");
    }

    Ok(migrated)
}

pub fn load_theme<S: KeyValueStore + ?Sized>(storage: &S) -> Result<Theme> {
    let theme = storage
        .get(keys::THEME)?
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();
    Ok(theme)
}

pub fn save_theme<S: KeyValueStore + ?Sized>(storage: &mut S, theme: Theme) -> Result<()> {
    storage.set(keys::THEME, theme.as_str())
}
