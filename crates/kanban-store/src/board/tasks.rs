use chrono::{DateTime, Utc};
use kanban_shared::{api::TaskField, Priority, Task};

use super::{Board, BoardState};
use crate::error::Result;
use crate::reorder::reorder_within_column;
use crate::storage::KeyValueStore;

impl BoardState {
    /// Moves a task to the end of (`column`, `category`). History is only
    /// appended when the column actually changes.
    pub(crate) fn move_task(
        &mut self,
        task_id: &str,
        column: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.tasks.contains_key(task_id) || !self.has_column(category, column) {
            return false;
        }

        let order = self.next_order(column, category, Some(task_id));
        let Some(task) = self.tasks.get_mut(task_id) else {
            return false;
        };

        let column_changed = task.column != column;
        task.column = column.to_string();
        task.category = category.to_string();
        task.order = order;
        task.touch(now);
        if column_changed {
            task.record_column_change(column, now);
        }
        true
    }

    pub(crate) fn apply_field(&mut self, task_id: &str, field: TaskField, now: DateTime<Utc>) -> bool {
        let field = match field {
            TaskField::Dependencies(deps) => {
                TaskField::Dependencies(self.known_dependencies(task_id, deps))
            }
            other => other,
        };

        let Some(task) = self.tasks.get_mut(task_id) else {
            return false;
        };

        match field {
            TaskField::Content(content) => {
                let content = content.trim();
                if content.is_empty() {
                    return false;
                }
                task.content = content.to_string();
            }
            TaskField::Priority(priority) => task.priority = priority,
            TaskField::Tags(tags) => {
                let mut unique: Vec<String> = Vec::with_capacity(tags.len());
                for tag in tags {
                    let tag = tag.trim().to_string();
                    if !tag.is_empty() && !unique.contains(&tag) {
                        unique.push(tag);
                    }
                }
                task.tags = unique;
            }
            TaskField::Dependencies(deps) => task.dependencies = deps,
            TaskField::Archived(archived) => task.archived = archived,
        }

        task.touch(now);
        true
    }

    /// Deduplicated ids that name an existing task other than `task_id`.
    fn known_dependencies(&self, task_id: &str, deps: Vec<String>) -> Vec<String> {
        let mut known: Vec<String> = Vec::with_capacity(deps.len());
        for dep in deps {
            if dep != task_id && self.tasks.contains_key(&dep) && !known.contains(&dep) {
                known.push(dep);
            }
        }
        known
    }

    pub(crate) fn delete_task(&mut self, task_id: &str) -> bool {
        self.tasks.remove(task_id).is_some()
    }
}

impl<S: KeyValueStore> Board<S> {
    /// Creates an empty task at the end of the column. Returns its id, or
    /// `None` when the column is not part of the category.
    pub fn create_task(&mut self, category: &str, column: &str) -> Result<Option<String>> {
        let created = self.mutate(|state, _, now| {
            if !state.has_column(category, column) {
                return None;
            }

            let order = state.next_order(column, category, None);
            let id = state.mint_task_id();
            let task = Task::new(id.clone(), "", category, column, order, now);
            state.tasks.insert(id.clone(), task);
            Some(id)
        })?;

        if let Some(ref id) = created {
            tracing::debug!(task_id = %id, category, column, "Created task");
        }
        Ok(created)
    }

    /// Generic setter. Always refreshes `updated_at` when the task exists.
    pub fn update_task_field(&mut self, task_id: &str, field: TaskField) -> Result<bool> {
        let updated = self
            .mutate(|state, _, now| state.apply_field(task_id, field, now).then_some(()))?
            .is_some();
        Ok(updated)
    }

    pub fn edit_task_content(&mut self, task_id: &str, content: &str) -> Result<bool> {
        self.update_task_field(task_id, TaskField::Content(content.to_string()))
    }

    pub fn set_priority(&mut self, task_id: &str, priority: Priority) -> Result<bool> {
        self.update_task_field(task_id, TaskField::Priority(priority))
    }

    /// Flips the archived flag.
    pub fn toggle_archive(&mut self, task_id: &str) -> Result<bool> {
        let Some(archived) = self.task(task_id).map(|t| t.archived) else {
            return Ok(false);
        };
        self.update_task_field(task_id, TaskField::Archived(!archived))
    }

    /// Moves a task to the end of another column (or category).
    pub fn move_task(&mut self, task_id: &str, column: &str, category: &str) -> Result<bool> {
        let moved = self
            .mutate(|state, _, now| state.move_task(task_id, column, category, now).then_some(()))?
            .is_some();

        if moved {
            tracing::debug!(task_id, column, category, "Moved task");
        }
        Ok(moved)
    }

    /// Drops `task_id` just before `target_id` within one column, renumbering
    /// the visible tasks of that column.
    pub fn reorder_task(
        &mut self,
        task_id: &str,
        target_id: &str,
        column: &str,
        category: &str,
    ) -> Result<bool> {
        let reordered = self
            .mutate(|state, filter, now| {
                reorder_within_column(
                    &mut state.tasks,
                    task_id,
                    target_id,
                    column,
                    category,
                    filter,
                    now,
                )
                .then_some(())
            })?
            .is_some();
        Ok(reordered)
    }

    /// Removes a task. Other tasks that depend on it keep the dangling id.
    pub fn delete_task(&mut self, task_id: &str) -> Result<bool> {
        let deleted = self
            .mutate(|state, _, _| state.delete_task(task_id).then_some(()))?
            .is_some();

        if deleted {
            self.selection.remove(task_id);
            tracing::debug!(task_id, "Deleted task");
        }
        Ok(deleted)
    }

    pub fn bulk_delete(&mut self) -> Result<usize> {
        self.bulk(|state, id, _| state.delete_task(id))
    }

    /// Moves every selected task to `column` within its own category.
    pub fn bulk_move(&mut self, column: &str) -> Result<usize> {
        self.bulk(|state, id, now| {
            let Some(category) = state.tasks.get(id).map(|t| t.category.clone()) else {
                return false;
            };
            state.move_task(id, column, &category, now)
        })
    }

    pub fn bulk_set_priority(&mut self, priority: Priority) -> Result<usize> {
        self.bulk(|state, id, now| state.apply_field(id, TaskField::Priority(priority), now))
    }

    pub fn bulk_archive(&mut self) -> Result<usize> {
        self.bulk(|state, id, now| state.apply_field(id, TaskField::Archived(true), now))
    }

    /// Applies `op` to each selected task in one write, then clears the
    /// selection. Returns how many tasks were affected.
    fn bulk(
        &mut self,
        op: impl Fn(&mut BoardState, &str, DateTime<Utc>) -> bool,
    ) -> Result<usize> {
        if self.selection.is_empty() {
            return Ok(0);
        }

        let selected: Vec<String> = self.selection.iter().cloned().collect();
        let affected = self
            .mutate(|state, _, now| {
                Some(selected.iter().filter(|id| op(state, id, now)).count())
            })?
            .unwrap_or(0);

        self.selection.clear();
        tracing::debug!(affected, "Applied bulk operation");
        Ok(affected)
    }

    /// Removes every task and idea and resets both counters. Columns stay.
    pub fn clear_all(&mut self) -> Result<()> {
        self.mutate(|state, _, _| {
            state.tasks.clear();
            state.ideas.clear();
            state.task_counter = 1;
            state.idea_counter = 1;
            Some(())
        })?;

        self.selection.clear();
        tracing::info!("Cleared all tasks and ideas");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use kanban_shared::{api::TaskField, Priority};

    #[test]
    fn test_create_task_appends_to_column() {
        let mut board = Board::in_memory();
        let first = board.create_task("personal", "waiting").unwrap().unwrap();
        let second = board.create_task("personal", "waiting").unwrap().unwrap();

        assert_eq!(first, "task-1");
        assert_eq!(second, "task-2");

        let task = board.task(&second).unwrap();
        assert_eq!(task.order, 1);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.column_history.len(), 1);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_create_task_rejects_unknown_column() {
        let mut board = Board::in_memory();
        assert_eq!(board.create_task("personal", "backlog").unwrap(), None);
        assert_eq!(board.create_task("garden", "done").unwrap(), None);
        assert_eq!(board.state().task_counter, 1);
    }

    #[test]
    fn test_update_field_refreshes_updated_at() {
        let mut board = Board::in_memory();
        let id = board.create_task("work", "in-progress").unwrap().unwrap();
        let before = board.task(&id).unwrap().updated_at;

        assert!(board.edit_task_content(&id, "  Draft slides  ").unwrap());
        let task = board.task(&id).unwrap();
        assert_eq!(task.content, "Draft slides");
        assert!(task.updated_at >= before);
        assert!(task.updated_at >= task.created_at);

        assert!(!board.edit_task_content(&id, "   ").unwrap());
        assert_eq!(board.task(&id).unwrap().content, "Draft slides");
        assert!(!board.set_priority("task-404", Priority::Low).unwrap());
    }

    #[test]
    fn test_tag_field_is_deduplicated() {
        let mut board = Board::in_memory();
        let id = board.create_task("work", "waiting").unwrap().unwrap();

        let tags = vec!["ops".to_string(), "Ops".to_string(), "ops".to_string(), " ".to_string()];
        assert!(board.update_task_field(&id, TaskField::Tags(tags)).unwrap());
        assert_eq!(board.task(&id).unwrap().tags, ["ops", "Ops"]);
    }

    #[test]
    fn test_dependency_field_drops_self_and_unknown() {
        let mut board = Board::in_memory();
        let a = board.create_task("work", "waiting").unwrap().unwrap();
        let b = board.create_task("work", "waiting").unwrap().unwrap();

        let deps = vec![a.clone(), b.clone(), "task-404".to_string(), b.clone()];
        assert!(board.update_task_field(&a, TaskField::Dependencies(deps)).unwrap());
        assert_eq!(board.task(&a).unwrap().dependencies, [b]);
    }

    #[test]
    fn test_move_across_columns_records_history() {
        let mut board = Board::in_memory();
        let a = board.create_task("personal", "on-the-table").unwrap().unwrap();
        let b = board.create_task("personal", "in-progress").unwrap().unwrap();

        assert!(board.move_task(&a, "in-progress", "personal").unwrap());
        let task = board.task(&a).unwrap();
        assert_eq!(task.column, "in-progress");
        assert_eq!(task.order, board.task(&b).unwrap().order + 1);
        assert_eq!(task.column_history.len(), 2);
        assert_eq!(task.column_history[1].column, "in-progress");
    }

    #[test]
    fn test_same_column_move_skips_history() {
        let mut board = Board::in_memory();
        let a = board.create_task("personal", "waiting").unwrap().unwrap();
        let _b = board.create_task("personal", "waiting").unwrap().unwrap();

        assert!(board.move_task(&a, "waiting", "personal").unwrap());
        let task = board.task(&a).unwrap();
        assert_eq!(task.column_history.len(), 1);
        assert_eq!(task.order, 2);
    }

    #[test]
    fn test_move_to_other_category() {
        let mut board = Board::in_memory();
        let a = board.create_task("personal", "waiting").unwrap().unwrap();

        assert!(board.move_task(&a, "done", "work").unwrap());
        let task = board.task(&a).unwrap();
        assert_eq!(task.category, "work");
        assert_eq!(task.order, 0);

        assert!(!board.move_task(&a, "nowhere", "work").unwrap());
    }

    #[test]
    fn test_delete_leaves_dangling_dependencies() {
        let mut board = Board::in_memory();
        let a = board.create_task("work", "waiting").unwrap().unwrap();
        let b = board.create_task("work", "waiting").unwrap().unwrap();
        board.add_dependency(&a, &b).unwrap();
        board.toggle_selection(&b);

        assert!(board.delete_task(&b).unwrap());
        assert!(!board.is_selected(&b));
        assert_eq!(board.task(&a).unwrap().dependencies, [b]);
        assert!(board.dependency_status(&a).is_empty());
    }

    #[test]
    fn test_toggle_archive() {
        let mut board = Board::in_memory();
        let a = board.create_task("work", "waiting").unwrap().unwrap();

        assert!(board.toggle_archive(&a).unwrap());
        assert!(board.task(&a).unwrap().archived);
        assert!(board.toggle_archive(&a).unwrap());
        assert!(!board.task(&a).unwrap().archived);
        assert!(!board.toggle_archive("task-404").unwrap());
    }

    #[test]
    fn test_bulk_operations_clear_selection() {
        let mut board = Board::in_memory();
        let a = board.create_task("personal", "on-the-table").unwrap().unwrap();
        let b = board.create_task("work", "on-the-table").unwrap().unwrap();
        let c = board.create_task("personal", "on-the-table").unwrap().unwrap();

        board.toggle_selection(&a);
        board.toggle_selection(&b);
        assert_eq!(board.bulk_set_priority(Priority::Urgent).unwrap(), 2);
        assert!(board.selection().is_empty());
        assert_eq!(board.task(&a).unwrap().priority, Priority::Urgent);
        assert_eq!(board.task(&c).unwrap().priority, Priority::Medium);

        board.toggle_selection(&a);
        board.toggle_selection(&b);
        assert_eq!(board.bulk_move("done").unwrap(), 2);
        assert_eq!(board.task(&a).unwrap().category, "personal");
        assert_eq!(board.task(&b).unwrap().category, "work");
        assert!(board.task(&b).unwrap().is_done());

        board.toggle_selection(&c);
        assert_eq!(board.bulk_archive().unwrap(), 1);
        assert!(board.task(&c).unwrap().archived);

        board.toggle_selection(&a);
        board.toggle_selection(&b);
        assert_eq!(board.bulk_delete().unwrap(), 2);
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.bulk_delete().unwrap(), 0);
    }

    #[test]
    fn test_clear_all_resets_counters() {
        let mut board = Board::in_memory();
        board.create_task("personal", "waiting").unwrap();
        board.create_idea("Call mum", "personal").unwrap();
        board.add_column("personal", "Backlog").unwrap();

        board.clear_all().unwrap();

        assert!(board.tasks().is_empty());
        assert!(board.state().ideas.is_empty());
        assert_eq!(board.state().task_counter, 1);
        assert_eq!(board.state().idea_counter, 1);
        assert!(board.columns_for("personal").contains(&"backlog".to_string()));
        assert_eq!(board.create_task("personal", "waiting").unwrap().as_deref(), Some("task-1"));
    }
}
