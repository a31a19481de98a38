//! Drag-reordering within a single column.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kanban_shared::{api::TaskFilter, Task};

use crate::query::matches_filters;

/// Places `dragged` immediately before `target` among the tasks currently
/// visible in (`column`, `category`), then renumbers that visible sequence
/// densely from 0.
///
/// Hidden tasks keep their order. Returns false (nothing touched) when either
/// task is missing, they are the same task, the dragged task does not live in
/// that column, or the target is not visible there.
pub fn reorder_within_column(
    tasks: &mut BTreeMap<String, Task>,
    dragged: &str,
    target: &str,
    column: &str,
    category: &str,
    filter: &TaskFilter,
    now: DateTime<Utc>,
) -> bool {
    if dragged == target {
        return false;
    }

    match tasks.get(dragged) {
        Some(task) if task.column == column && task.category == category => {}
        _ => return false,
    }

    let mut visible: Vec<(i64, String)> = tasks
        .values()
        .filter(|t| t.column == column && t.category == category && matches_filters(t, filter))
        .map(|t| (t.order, t.id.clone()))
        .collect();
    visible.sort_by_key(|(order, _)| *order);

    let mut sequence: Vec<String> = visible
        .into_iter()
        .map(|(_, id)| id)
        .filter(|id| id != dragged)
        .collect();

    let Some(index) = sequence.iter().position(|id| id == target) else {
        return false;
    };
    sequence.insert(index, dragged.to_string());

    for (position, id) in sequence.iter().enumerate() {
        if let Some(task) = tasks.get_mut(id) {
            task.order = position as i64;
            task.touch(now);
        }
    }

    tracing::debug!(dragged, target, column, category, "Reordered column");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(orders: &[(&str, i64)]) -> BTreeMap<String, Task> {
        let now = Utc::now();
        orders
            .iter()
            .map(|(id, order)| {
                (
                    id.to_string(),
                    Task::new(*id, *id, "personal", "on-the-table", *order, now),
                )
            })
            .collect()
    }

    fn order_of(tasks: &BTreeMap<String, Task>, id: &str) -> i64 {
        tasks[id].order
    }

    #[test]
    fn test_drop_before_first() {
        let mut tasks = board(&[("task-0", 0), ("task-1", 1), ("task-2", 2)]);
        let filter = TaskFilter::default();

        assert!(reorder_within_column(
            &mut tasks, "task-2", "task-0", "on-the-table", "personal", &filter, Utc::now()
        ));

        assert_eq!(order_of(&tasks, "task-2"), 0);
        assert_eq!(order_of(&tasks, "task-0"), 1);
        assert_eq!(order_of(&tasks, "task-1"), 2);
    }

    #[test]
    fn test_sparse_orders_become_dense() {
        let mut tasks = board(&[("task-a", 10), ("task-b", 40), ("task-c", 25), ("task-d", 7)]);
        let filter = TaskFilter::default();

        assert!(reorder_within_column(
            &mut tasks, "task-d", "task-b", "on-the-table", "personal", &filter, Utc::now()
        ));

        let mut orders: Vec<i64> = tasks.values().map(|t| t.order).collect();
        orders.sort();
        assert_eq!(orders, [0, 1, 2, 3]);
        // a(10) c(25) d b(40)
        assert_eq!(order_of(&tasks, "task-a"), 0);
        assert_eq!(order_of(&tasks, "task-c"), 1);
        assert_eq!(order_of(&tasks, "task-d"), 2);
        assert_eq!(order_of(&tasks, "task-b"), 3);
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let mut tasks = board(&[("task-0", 0), ("task-1", 1), ("task-2", 2), ("task-3", 3)]);
        let filter = TaskFilter::default();

        reorder_within_column(&mut tasks, "task-3", "task-1", "on-the-table", "personal", &filter, Utc::now());
        let once: Vec<i64> = tasks.values().map(|t| t.order).collect();

        reorder_within_column(&mut tasks, "task-3", "task-1", "on-the-table", "personal", &filter, Utc::now());
        let twice: Vec<i64> = tasks.values().map(|t| t.order).collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_hidden_tasks_keep_their_order() {
        let mut tasks = board(&[("task-0", 0), ("task-1", 1), ("task-2", 2)]);
        tasks.get_mut("task-1").unwrap().archived = true;
        tasks.get_mut("task-1").unwrap().order = 8;
        let filter = TaskFilter::default();

        assert!(reorder_within_column(
            &mut tasks, "task-2", "task-0", "on-the-table", "personal", &filter, Utc::now()
        ));

        assert_eq!(order_of(&tasks, "task-2"), 0);
        assert_eq!(order_of(&tasks, "task-0"), 1);
        assert_eq!(order_of(&tasks, "task-1"), 8);
    }

    #[test]
    fn test_invalid_requests_are_noops() {
        let mut tasks = board(&[("task-0", 0), ("task-1", 1)]);
        let before = tasks.clone();
        let filter = TaskFilter::default();
        let now = Utc::now();

        assert!(!reorder_within_column(&mut tasks, "task-0", "task-0", "on-the-table", "personal", &filter, now));
        assert!(!reorder_within_column(&mut tasks, "task-9", "task-0", "on-the-table", "personal", &filter, now));
        assert!(!reorder_within_column(&mut tasks, "task-0", "task-9", "on-the-table", "personal", &filter, now));
        assert!(!reorder_within_column(&mut tasks, "task-0", "task-1", "done", "personal", &filter, now));
        assert_eq!(tasks, before);
    }
}
