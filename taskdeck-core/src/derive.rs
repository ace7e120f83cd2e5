//! Pure derivations over the task collection.
//!
//! Each value here is recomputed from current state on demand and never
//! stored. Collection order (most-recent-first) is preserved wherever a
//! subset of tasks is returned.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};

use crate::filter::FilterState;
use crate::task::Task;

/// Completion statistics for the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of tasks in the collection.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of tasks still open (`total - completed`).
    pub active: usize,
}

/// Lexicographically sorted set of every distinct tag across all tasks.
#[must_use]
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let distinct: BTreeSet<&str> = tasks
        .iter()
        .flat_map(|task| task.tags.iter().map(String::as_str))
        .collect();
    distinct.into_iter().map(ToOwned::to_owned).collect()
}

/// Tasks satisfying every active filter facet, collection order preserved.
#[must_use]
pub fn filtered_tasks<'a>(tasks: &'a [Task], filter: &FilterState) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Total, completed, and active counts for the collection.
#[must_use]
pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    Stats {
        total,
        completed,
        active: total - completed,
    }
}

/// True iff the task has a due date strictly before `now` and is not
/// completed.
///
/// The due date is interpreted at UTC midnight, so a task due today reads
/// as overdue once the day has started. Display-only; never stored.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed
        && task
            .due_date
            .is_some_and(|due| due.and_time(NaiveTime::MIN).and_utc() < now)
}
