use kanban_shared::{Idea, Task};

use super::Board;
use crate::error::Result;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> Board<S> {
    /// Ideas of one category, oldest first.
    pub fn ideas_for(&self, category: &str) -> Vec<&Idea> {
        let mut ideas: Vec<&Idea> = self
            .state
            .ideas
            .values()
            .filter(|idea| idea.category == category)
            .collect();
        ideas.sort_by_key(|idea| idea.created_at);
        ideas
    }

    /// Captures a trimmed, non-empty note. Returns the new idea id.
    pub fn create_idea(&mut self, content: &str, category: &str) -> Result<Option<String>> {
        let content = content.trim();
        if content.is_empty() || category.is_empty() {
            return Ok(None);
        }

        let created = self.mutate(|state, _, now| {
            let id = state.mint_idea_id();
            state.ideas.insert(
                id.clone(),
                Idea {
                    id: id.clone(),
                    content: content.to_string(),
                    category: category.to_string(),
                    created_at: now,
                },
            );
            Some(id)
        })?;

        if let Some(ref id) = created {
            tracing::debug!(idea_id = %id, category, "Captured idea");
        }
        Ok(created)
    }

    /// Turns an idea into a task at the end of the target column; the idea is
    /// removed in the same write. Returns the new task id.
    pub fn promote_idea(
        &mut self,
        idea_id: &str,
        column: &str,
        category: &str,
    ) -> Result<Option<String>> {
        let promoted = self.mutate(|state, _, now| {
            if !state.has_column(category, column) {
                return None;
            }
            let idea = state.ideas.remove(idea_id)?;

            let order = state.next_order(column, category, None);
            let id = state.mint_task_id();
            let task = Task::new(id.clone(), idea.content, category, column, order, now);
            state.tasks.insert(id.clone(), task);
            Some(id)
        })?;

        if let Some(ref task_id) = promoted {
            tracing::debug!(idea_id, task_id = %task_id, column, category, "Promoted idea");
        }
        Ok(promoted)
    }

    pub fn delete_idea(&mut self, idea_id: &str) -> Result<bool> {
        let deleted = self
            .mutate(|state, _, _| state.ideas.remove(idea_id).map(|_| ()))?
            .is_some();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;

    #[test]
    fn test_blank_idea_is_ignored() {
        let mut board = Board::in_memory();
        assert_eq!(board.create_idea("   ", "personal").unwrap(), None);
        assert!(board.state().ideas.is_empty());
        assert_eq!(board.state().idea_counter, 1);
    }

    #[test]
    fn test_ideas_for_category() {
        let mut board = Board::in_memory();
        board.create_idea("Paint fence", "personal").unwrap();
        board.create_idea("Hire intern", "work").unwrap();
        board.create_idea("  Read book ", "personal").unwrap();

        let contents: Vec<&str> = board
            .ideas_for("personal")
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(contents, ["Paint fence", "Read book"]);
    }

    #[test]
    fn test_promote_moves_content_into_task() {
        let mut board = Board::in_memory();
        let idea = board.create_idea("Plan offsite", "work").unwrap().unwrap();
        board.create_task("work", "waiting").unwrap();

        let task_id = board.promote_idea(&idea, "waiting", "work").unwrap().unwrap();

        assert!(board.state().ideas.is_empty());
        let task = board.task(&task_id).unwrap();
        assert_eq!(task.content, "Plan offsite");
        assert_eq!(task.order, 1);
        assert_eq!(task.column_history.len(), 1);
        assert_eq!(task.column_history[0].column, "waiting");
    }

    #[test]
    fn test_promote_missing_idea_or_column_is_noop() {
        let mut board = Board::in_memory();
        let idea = board.create_idea("Plan offsite", "work").unwrap().unwrap();

        assert_eq!(board.promote_idea("idea-404", "waiting", "work").unwrap(), None);
        assert_eq!(board.promote_idea(&idea, "someday", "work").unwrap(), None);
        assert_eq!(board.state().ideas.len(), 1);
        assert!(board.tasks().is_empty());
        assert_eq!(board.state().task_counter, 1);
    }

    #[test]
    fn test_delete_idea() {
        let mut board = Board::in_memory();
        let idea = board.create_idea("Plan offsite", "work").unwrap().unwrap();
        assert!(board.delete_idea(&idea).unwrap());
        assert!(!board.delete_idea(&idea).unwrap());
    }
}
