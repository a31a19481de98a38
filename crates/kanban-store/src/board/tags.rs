use super::Board;
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::view::{self, DependencyStatus};

impl<S: KeyValueStore> Board<S> {
    /// Adds a case-sensitive tag. Blank or already present tags are no-ops.
    pub fn add_tag(&mut self, task_id: &str, tag: &str) -> Result<bool> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(false);
        }

        let added = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                if task.has_tag(tag) {
                    return None;
                }
                task.tags.push(tag.to_string());
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(added)
    }

    pub fn remove_tag(&mut self, task_id: &str, tag: &str) -> Result<bool> {
        let removed = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                let before = task.tags.len();
                task.tags.retain(|t| t != tag);
                if task.tags.len() == before {
                    return None;
                }
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(removed)
    }

    /// Records that `task_id` waits on `dependency_id`. The dependency must
    /// exist and differ from the task itself.
    pub fn add_dependency(&mut self, task_id: &str, dependency_id: &str) -> Result<bool> {
        if task_id == dependency_id {
            return Ok(false);
        }

        let added = self
            .mutate(|state, _, now| {
                if !state.tasks.contains_key(dependency_id) {
                    return None;
                }
                let task = state.tasks.get_mut(task_id)?;
                if task.dependencies.iter().any(|d| d == dependency_id) {
                    return None;
                }
                task.dependencies.push(dependency_id.to_string());
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(added)
    }

    pub fn remove_dependency(&mut self, task_id: &str, dependency_id: &str) -> Result<bool> {
        let removed = self
            .mutate(|state, _, now| {
                let task = state.tasks.get_mut(task_id)?;
                let before = task.dependencies.len();
                task.dependencies.retain(|d| d != dependency_id);
                if task.dependencies.len() == before {
                    return None;
                }
                task.touch(now);
                Some(())
            })?
            .is_some();
        Ok(removed)
    }

    /// Resolved dependencies of a task; ids whose task is gone are skipped.
    pub fn dependency_status(&self, task_id: &str) -> Vec<DependencyStatus> {
        self.task(task_id)
            .map(|task| view::dependency_statuses(task, &self.state.tasks))
            .unwrap_or_default()
    }
}
