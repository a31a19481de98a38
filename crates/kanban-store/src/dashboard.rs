//! Completion metrics for a category.

use chrono::{DateTime, Utc};
use kanban_shared::Task;
use serde::Serialize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    /// Whole percent, 0 when the category is empty.
    pub completion_rate: u32,
    pub average_completion_days: i64,
}

impl DashboardStats {
    /// Aggregates non-archived tasks of `category`.
    ///
    /// The average uses `updated_at` as the completion time, so any later edit
    /// of a finished task shifts it.
    pub fn for_category<'a, I>(tasks: I, category: &str) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let tasks: Vec<&Task> = tasks
            .into_iter()
            .filter(|t| t.category == category && !t.archived)
            .collect();

        let total = tasks.len();
        let completed: Vec<&Task> = tasks.iter().copied().filter(|t| t.is_done()).collect();

        let completion_rate = if total > 0 {
            (completed.len() as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        let timed: Vec<i64> = completed
            .iter()
            .filter(|t| !t.column_history.is_empty())
            .map(|t| ceil_days(t.created_at, t.updated_at))
            .collect();

        let average_completion_days = if timed.is_empty() {
            0
        } else {
            (timed.iter().sum::<i64>() as f64 / timed.len() as f64).round() as i64
        };

        Self {
            total,
            completed: completed.len(),
            completion_rate,
            average_completion_days,
        }
    }
}

/// Whole days (rounded up) the task has spent in its current column.
pub fn time_in_column(task: &Task, now: DateTime<Utc>) -> i64 {
    ceil_days(task.entered_column_at(), now)
}

fn ceil_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn task(id: &str, column: &str) -> Task {
        Task::new(id, id, "personal", column, 0, at(1, 9))
    }

    #[test]
    fn test_empty_category() {
        let stats = DashboardStats::for_category(std::iter::empty(), "personal");
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_quarter_complete() {
        let tasks = [
            task("task-1", "done"),
            task("task-2", "on-the-table"),
            task("task-3", "in-progress"),
            task("task-4", "waiting"),
        ];

        let stats = DashboardStats::for_category(tasks.iter(), "personal");
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_rate, 25);
    }

    #[test]
    fn test_archived_and_other_categories_ignored() {
        let mut archived = task("task-1", "done");
        archived.archived = true;
        let mut work = task("task-2", "done");
        work.category = "work".to_string();
        let open = task("task-3", "waiting");

        let stats = DashboardStats::for_category([&archived, &work, &open], "personal");
        assert_eq!(stats.total, 1);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn test_average_completion_days_rounds_up_each_task() {
        let mut quick = task("task-1", "done");
        quick.updated_at = at(1, 10); // one hour -> 1 day
        let mut slow = task("task-2", "done");
        slow.updated_at = at(5, 8); // just under 4 days -> 4
        let mut untracked = task("task-3", "done");
        untracked.column_history.clear();
        untracked.updated_at = at(30, 9);

        let stats = DashboardStats::for_category([&quick, &slow, &untracked], "personal");
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.completion_rate, 100);
        // (1 + 4) / 2 = 2.5 -> 3
        assert_eq!(stats.average_completion_days, 3);
    }

    #[test]
    fn test_time_in_column_uses_last_history_entry() {
        let mut t = task("task-1", "waiting");
        t.record_column_change("in-progress", at(3, 9));

        assert_eq!(time_in_column(&t, at(3, 9)), 0);
        assert_eq!(time_in_column(&t, at(3, 9) + Duration::hours(1)), 1);
        assert_eq!(time_in_column(&t, at(6, 9)), 3);
    }

    #[test]
    fn test_time_in_column_falls_back_to_created_at() {
        let mut t = task("task-1", "waiting");
        t.column_history.clear();

        assert_eq!(time_in_column(&t, at(2, 21)), 2);
    }
}
