//! Read models for list cards and task rows.

use crate::model::list::TaskList;
use crate::model::task::Task;
use chrono::{DateTime, Utc};

/// Completion colour band for a list's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// 0-25%.
    Low,
    /// 26-50%.
    Medium,
    /// 51-99%.
    High,
    /// Every task done.
    Complete,
}

impl ProgressBand {
    /// Classifies `completed / total` with exact integer comparisons.
    /// An empty list is `Low`.
    pub fn classify(completed: usize, total: usize) -> Self {
        if total > 0 && completed >= total {
            Self::Complete
        } else if completed * 2 > total {
            Self::High
        } else if completed * 4 > total {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Coarse "time since" label for list creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    JustNow,
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
    Days(u64),
}

impl RelativeAge {
    /// Buckets the elapsed time from `then` to `now`.
    ///
    /// Up to 5 seconds (or any future instant) is `JustNow`.
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = (now - then).num_seconds();
        if seconds <= 5 {
            return Self::JustNow;
        }
        let seconds = seconds.unsigned_abs();
        let minutes = seconds / 60;
        let hours = minutes / 60;
        if seconds < 60 {
            Self::Seconds(seconds)
        } else if minutes < 60 {
            Self::Minutes(minutes)
        } else if hours < 24 {
            Self::Hours(hours)
        } else {
            Self::Days(hours / 24)
        }
    }
}

/// List card shown on the lists screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOverview {
    pub list: TaskList,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded completion percentage, 0 for an empty list.
    pub completion_percent: u8,
    pub band: ProgressBand,
    /// `None` when the stored `createdAt` cannot be parsed.
    pub age: Option<RelativeAge>,
}

impl ListOverview {
    pub(crate) fn build(list: TaskList, tasks: &[Task], now: DateTime<Utc>) -> Self {
        let (total, completed) = tasks
            .iter()
            .filter(|task| task.list_id == list.id)
            .fold((0usize, 0usize), |(total, done), task| {
                (total + 1, done + usize::from(task.completed))
            });
        let age = list
            .created_at_parsed()
            .map(|created| RelativeAge::between(created, now));
        Self {
            total_tasks: total,
            completed_tasks: completed,
            completion_percent: completion_percent(completed, total),
            band: ProgressBand::classify(completed, total),
            age,
            list,
        }
    }
}

/// Task row in the list detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task: Task,
    pub overdue: bool,
}

fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (completed * 100 + total / 2) / total;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
