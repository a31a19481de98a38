//! Filtered and grouped views over the task collection.

use std::collections::{BTreeMap, BTreeSet};

use kanban_shared::{api::TaskFilter, Task};

/// Whether `task` is visible under `filter`. All predicates must hold.
pub fn matches_filters(task: &Task, filter: &TaskFilter) -> bool {
    if task.archived != filter.show_archived {
        return false;
    }

    if !filter.search.is_empty() {
        let needle = filter.search.to_lowercase();
        let hit = task.content.to_lowercase().contains(&needle)
            || task
                .subtasks
                .iter()
                .any(|s| s.content.to_lowercase().contains(&needle))
            || task
                .comments
                .iter()
                .any(|c| c.content.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }

    if let Some(ref tag) = filter.tag {
        if !task.has_tag(tag) {
            return false;
        }
    }

    true
}

/// Visible tasks partitioned by (category, column), each group sorted by order.
#[derive(Debug, Default)]
pub struct TaskGroups<'a> {
    groups: BTreeMap<(String, String), Vec<&'a Task>>,
}

impl<'a> TaskGroups<'a> {
    pub fn build<I>(tasks: I, filter: &TaskFilter) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut groups: BTreeMap<(String, String), Vec<&'a Task>> = BTreeMap::new();

        for task in tasks {
            if !matches_filters(task, filter) {
                continue;
            }
            groups
                .entry((task.category.clone(), task.column.clone()))
                .or_default()
                .push(task);
        }

        // sort_by_key is stable, so equal orders keep iteration order
        for group in groups.values_mut() {
            group.sort_by_key(|task| task.order);
        }

        Self { groups }
    }

    pub fn column(&self, category: &str, column: &str) -> &[&'a Task] {
        self.groups
            .get(&(category.to_string(), column.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: &str, column: &str) -> usize {
        self.column(category, column).len()
    }

    /// Per-group sizes keyed by (category, column).
    pub fn counts(&self) -> BTreeMap<(String, String), usize> {
        self.groups
            .iter()
            .map(|(key, tasks)| (key.clone(), tasks.len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &Vec<&'a Task>)> {
        self.groups.iter()
    }
}

/// Distinct tags used by tasks of `category`, sorted.
pub fn available_tags<'a, I>(tasks: I, category: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.category == category)
        .flat_map(|task| task.tags.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kanban_shared::{Comment, Priority, Subtask};

    fn task(id: &str, column: &str, order: i64) -> Task {
        Task::new(id, format!("Task {id}"), "personal", column, order, Utc::now())
    }

    #[test]
    fn test_archived_flag_must_match_toggle() {
        let mut archived = task("task-1", "waiting", 0);
        archived.archived = true;
        let active = task("task-2", "waiting", 1);

        let filter = TaskFilter::default();
        assert!(!matches_filters(&archived, &filter));
        assert!(matches_filters(&active, &filter));

        let filter = TaskFilter {
            show_archived: true,
            ..Default::default()
        };
        assert!(matches_filters(&archived, &filter));
        assert!(!matches_filters(&active, &filter));
    }

    #[test]
    fn test_search_reaches_subtasks_and_comments() {
        let now = Utc::now();
        let mut t = task("task-1", "waiting", 0);
        t.content = "Quarterly review".to_string();
        t.subtasks.push(Subtask::new("Collect NUMBERS"));
        t.comments.push(Comment::new("ping finance", now));

        let search = |s: &str| TaskFilter {
            search: s.to_string(),
            ..Default::default()
        };

        assert!(matches_filters(&t, &search("QUARTERLY")));
        assert!(matches_filters(&t, &search("numbers")));
        assert!(matches_filters(&t, &search("Finance")));
        assert!(!matches_filters(&t, &search("holiday")));
    }

    #[test]
    fn test_priority_and_tag_are_conjunctive() {
        let mut t = task("task-1", "waiting", 0);
        t.priority = Priority::High;
        t.tags.push("Home".to_string());

        let filter = TaskFilter {
            priority: Some(Priority::High),
            tag: Some("Home".to_string()),
            ..Default::default()
        };
        assert!(matches_filters(&t, &filter));

        let filter = TaskFilter {
            priority: Some(Priority::High),
            tag: Some("home".to_string()),
            ..Default::default()
        };
        assert!(!matches_filters(&t, &filter));
    }

    #[test]
    fn test_groups_sorted_by_order() {
        let tasks = [
            task("task-1", "waiting", 5),
            task("task-2", "waiting", 1),
            task("task-3", "done", 0),
            task("task-4", "waiting", 3),
        ];

        let groups = TaskGroups::build(tasks.iter(), &TaskFilter::default());
        let ids: Vec<&str> = groups
            .column("personal", "waiting")
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(ids, ["task-2", "task-4", "task-1"]);
        assert_eq!(groups.count("personal", "done"), 1);
        assert_eq!(groups.count("work", "done"), 0);
    }

    #[test]
    fn test_available_tags_scoped_to_category() {
        let mut a = task("task-1", "waiting", 0);
        a.tags = vec!["b".into(), "a".into()];
        let mut b = task("task-2", "waiting", 1);
        b.category = "work".to_string();
        b.tags = vec!["c".into()];

        let tags = available_tags([&a, &b], "personal");
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }
}
