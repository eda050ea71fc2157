//! Task ordering for the home summary and list detail views.
//!
//! # Responsibility
//! - Produce deterministic display order for a snapshot of tasks.
//! - Recover from malformed optional fields without failing the call.
//!
//! # Invariants
//! - Both orderings are pure: same input and `now` give the same output.
//! - Sorting is stable; records with equal keys keep input order.
//! - Summary output never contains completed tasks.
//! - Detail output lists every incomplete task before every completed one.
//! - A record with blank `id`/`listId` rejects the whole call.

use crate::model::task::{Task, TaskValidationError};
use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type OrderingResult<T> = Result<T, OrderingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingError {
    /// Input record at `index` is missing an identity field.
    InvalidTaskRecord {
        index: usize,
        reason: TaskValidationError,
    },
}

impl Display for OrderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTaskRecord { index, reason } => {
                write!(f, "invalid task record at index {index}: {reason}")
            }
        }
    }
}

impl Error for OrderingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTaskRecord { reason, .. } => Some(reason),
        }
    }
}

/// Orders incomplete tasks for the home overview.
///
/// Overdue tasks come first, then priority (high, medium, low), then due
/// date ascending with undated tasks last. Completed tasks are dropped.
/// The result is not truncated.
///
/// # Errors
/// - `InvalidTaskRecord` when any input task lacks `id` or `listId`.
pub fn summary_order(tasks: &[Task], now: DateTime<Utc>) -> OrderingResult<Vec<&Task>> {
    ensure_identities(tasks)?;

    let mut keyed = tasks
        .iter()
        .filter(|task| !task.completed)
        .map(|task| (summary_key(task, now), task))
        .collect::<Vec<_>>();
    keyed.sort_by(|left, right| left.0.cmp(&right.0));

    Ok(keyed.into_iter().map(|(_, task)| task).collect())
}

/// Orders every task of one list for the detail view.
///
/// Incomplete tasks: priority, then due date ascending (undated last), then
/// newest `createdAt` first. Completed tasks follow, most recently completed
/// first; a missing or malformed `completedAt` sorts last.
///
/// # Errors
/// - `InvalidTaskRecord` when any input task lacks `id` or `listId`.
pub fn detail_order(tasks: &[Task]) -> OrderingResult<Vec<&Task>> {
    ensure_identities(tasks)?;

    let mut keyed = tasks
        .iter()
        .map(|task| (detail_key(task), task))
        .collect::<Vec<_>>();
    keyed.sort_by(|left, right| left.0.cmp(&right.0));

    Ok(keyed.into_iter().map(|(_, task)| task).collect())
}

fn ensure_identities(tasks: &[Task]) -> OrderingResult<()> {
    for (index, task) in tasks.iter().enumerate() {
        task.validate_identity()
            .map_err(|reason| OrderingError::InvalidTaskRecord { index, reason })?;
    }
    Ok(())
}

/// Due date key where dated tasks sort before undated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DueKey(Option<DateTime<Utc>>);

impl Ord for DueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SummaryKey {
    // false sorts first, so overdue rows lead.
    not_overdue: bool,
    priority: u8,
    due: DueKey,
}

fn summary_key(task: &Task, now: DateTime<Utc>) -> SummaryKey {
    let due = task.due_at();
    SummaryKey {
        not_overdue: !due.is_some_and(|value| value < now),
        priority: task.priority.rank(),
        due: DueKey(due),
    }
}

// Variant order matters: every `Open` key sorts before every `Done` key.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DetailKey {
    Open {
        priority: u8,
        due: DueKey,
        created: Reverse<Option<DateTime<Utc>>>,
    },
    Done {
        completed: Reverse<Option<DateTime<Utc>>>,
    },
}

fn detail_key(task: &Task) -> DetailKey {
    if task.completed {
        DetailKey::Done {
            completed: Reverse(task.completed_at_parsed()),
        }
    } else {
        DetailKey::Open {
            priority: task.priority.rank(),
            due: DueKey(task.due_at()),
            created: Reverse(task.created_at_parsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{detail_order, summary_order, DueKey, OrderingError};
    use crate::model::task::{Task, TaskPriority, TaskValidationError};
    use chrono::{TimeZone, Utc};

    fn task(id: &str) -> Task {
        Task::new(id, "list-1", id, "2026-01-01T00:00:00.000Z")
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.id.clone()).collect()
    }

    #[test]
    fn due_key_puts_dated_before_undated() {
        let dated = DueKey(Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
        assert!(dated < DueKey(None));
        assert_eq!(DueKey(None), DueKey(None));
    }

    #[test]
    fn summary_drops_completed_and_sorts_undated_last() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let mut done = task("done");
        done.set_completed(true, "2026-05-31T00:00:00.000Z");
        let undated = task("undated");
        let mut later = task("later");
        later.due_date = Some("2026-06-20T00:00:00.000Z".to_string());
        let mut sooner = task("sooner");
        sooner.due_date = Some("2026-06-02T00:00:00.000Z".to_string());

        let input = vec![done, undated, later, sooner];
        let ordered = summary_order(&input, now).unwrap();
        assert_eq!(ids(&ordered), vec!["sooner", "later", "undated"]);
    }

    #[test]
    fn detail_sorts_open_by_created_desc_when_priority_and_due_tie() {
        let mut older = task("older");
        older.created_at = "2026-01-01T00:00:00.000Z".to_string();
        let mut newer = task("newer");
        newer.created_at = "2026-02-01T00:00:00.000Z".to_string();

        let input = vec![older, newer];
        let ordered = detail_order(&input).unwrap();
        assert_eq!(ids(&ordered), vec!["newer", "older"]);
    }

    #[test]
    fn unrecognized_priority_ties_with_low() {
        let mut odd = task("odd");
        odd.priority = TaskPriority::parse("someday");
        let mut low = task("low");
        low.priority = TaskPriority::Low;
        let mut medium = task("medium");
        medium.priority = TaskPriority::Medium;

        let input = vec![odd, low, medium];
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let ordered = summary_order(&input, now).unwrap();
        assert_eq!(ids(&ordered), vec!["medium", "odd", "low"]);
    }

    #[test]
    fn missing_list_id_rejects_whole_call() {
        let mut broken = task("broken");
        broken.list_id = String::new();
        let input = vec![task("ok"), broken];

        let err = detail_order(&input).unwrap_err();
        assert_eq!(
            err,
            OrderingError::InvalidTaskRecord {
                index: 1,
                reason: TaskValidationError::MissingListId,
            }
        );
    }
}
