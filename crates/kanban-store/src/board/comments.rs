use kanban_shared::{Comment, Subtask};

use super::Board;
use crate::error::Result;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> Board<S> {
    /// Appends a subtask. Returns its id; blank text or a missing task is a no-op.
    pub fn add_subtask(&mut self, task_id: &str, content: &str) -> Result<Option<String>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        self.mutate(|state, _, now| {
            let task = state.tasks.get_mut(task_id)?;
            let subtask = Subtask::new(content);
            let id = subtask.id.clone();
            task.subtasks.push(subtask);
            task.touch(now);
            Some(id)
        })
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<bool> {
        let toggled = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                let subtask = task.subtasks.iter_mut().find(|s| s.id == subtask_id)?;
                subtask.completed = !subtask.completed;
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(toggled)
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<bool> {
        let deleted = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                let before = task.subtasks.len();
                task.subtasks.retain(|s| s.id != subtask_id);
                if task.subtasks.len() == before {
                    return None;
                }
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(deleted)
    }

    /// Appends a timestamped comment. Returns its id.
    pub fn add_comment(&mut self, task_id: &str, content: &str) -> Result<Option<String>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        self.mutate(|state, _, now| {
            let task = state.tasks.get_mut(task_id)?;
            let comment = Comment::new(content, now);
            let id = comment.id.clone();
            task.comments.push(comment);
            task.touch(now);
            Some(id)
        })
    }

    pub fn delete_comment(&mut self, task_id: &str, comment_id: &str) -> Result<bool> {
        let deleted = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                let before = task.comments.len();
                task.comments.retain(|c| c.id != comment_id);
                if task.comments.len() == before {
                    return None;
                }
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(deleted)
    }
}
