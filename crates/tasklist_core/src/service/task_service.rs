//! List/task use-case service.
//!
//! # Responsibility
//! - Provide the create/edit/toggle/delete flows behind the list screens.
//! - Derive ordered read models for the home summary and list detail views.
//!
//! # Invariants
//! - Tasks can only be added to an existing list.
//! - Deleting a list deletes every task referencing it.
//! - `completed_at` is stamped on completion and cleared on reopen.
//! - Every write path persists the full collection it changed.

use crate::model::list::TaskList;
use crate::model::task::{Task, TaskId, TaskPriority, DEFAULT_REPEAT, DEFAULT_SOUND};
use crate::model::theme::ThemeMode;
use crate::model::timestamp::format_timestamp;
use crate::ordering::{detail_order, summary_order, OrderingError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::overview::{ListOverview, TaskRow};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Home screen shows at most this many tasks.
pub const SUMMARY_LIMIT: usize = 7;

pub type ServiceResult<T> = Result<T, TaskServiceError>;

#[derive(Debug)]
pub enum TaskServiceError {
    /// Task title is blank after trim.
    InvalidTitle,
    /// List name is blank after trim.
    InvalidListName,
    ListNotFound(TaskId),
    TaskNotFound(TaskId),
    Ordering(OrderingError),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "task title must not be blank"),
            Self::InvalidListName => write!(f, "list name must not be blank"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Ordering(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ordering(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<OrderingError> for TaskServiceError {
    fn from(value: OrderingError) -> Self {
        Self::Ordering(value)
    }
}

/// Input for the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub list_id: TaskId,
    pub title: String,
    pub text: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    /// `None` stores `"never"`.
    pub repeat: Option<String>,
    /// `None` stores `"default"`.
    pub sound: Option<String>,
}

/// Full replacement of the editable task fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub text: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
}

/// Use-case facade over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an empty list stamped with `now`.
    pub fn create_list(&self, name: &str, now: DateTime<Utc>) -> ServiceResult<TaskList> {
        let name = normalize_required(name).ok_or(TaskServiceError::InvalidListName)?;
        let mut lists = self.repo.load_lists()?;
        let list = TaskList::new(new_id(), name, format_timestamp(now));
        lists.push(list.clone());
        self.repo.save_lists(&lists)?;
        info!(
            "event=list_create module=service status=ok list_id={}",
            list.id
        );
        Ok(list)
    }

    pub fn rename_list(&self, list_id: &str, name: &str) -> ServiceResult<TaskList> {
        let name = normalize_required(name).ok_or(TaskServiceError::InvalidListName)?;
        let mut lists = self.repo.load_lists()?;
        let list = lists
            .iter_mut()
            .find(|list| list.id == list_id)
            .ok_or_else(|| TaskServiceError::ListNotFound(list_id.to_string()))?;
        list.name = name;
        let renamed = list.clone();
        self.repo.save_lists(&lists)?;
        Ok(renamed)
    }

    /// Deletes a list and all of its tasks. Returns the number of tasks removed.
    pub fn delete_list(&self, list_id: &str) -> ServiceResult<usize> {
        let mut lists = self.repo.load_lists()?;
        let before = lists.len();
        lists.retain(|list| list.id != list_id);
        if lists.len() == before {
            return Err(TaskServiceError::ListNotFound(list_id.to_string()));
        }

        let mut tasks = self.repo.load_tasks()?;
        let task_count = tasks.len();
        tasks.retain(|task| task.list_id != list_id);
        let removed = task_count - tasks.len();

        // Tasks first: a crash in between leaves an empty list, not orphans.
        self.repo.save_tasks(&tasks)?;
        self.repo.save_lists(&lists)?;
        info!(
            "event=list_delete module=service status=ok list_id={list_id} cascaded_tasks={removed}"
        );
        Ok(removed)
    }

    /// Lists in creation order with progress and age.
    pub fn list_overviews(&self, now: DateTime<Utc>) -> ServiceResult<Vec<ListOverview>> {
        let lists = self.repo.load_lists()?;
        let tasks = self.repo.load_tasks()?;
        Ok(lists
            .into_iter()
            .map(|list| ListOverview::build(list, &tasks, now))
            .collect())
    }

    pub fn add_task(&self, request: &NewTask, now: DateTime<Utc>) -> ServiceResult<Task> {
        let title = normalize_required(&request.title).ok_or(TaskServiceError::InvalidTitle)?;
        let lists = self.repo.load_lists()?;
        if !lists.iter().any(|list| list.id == request.list_id) {
            return Err(TaskServiceError::ListNotFound(request.list_id.clone()));
        }

        let mut task = Task::new(
            new_id(),
            request.list_id.clone(),
            title,
            format_timestamp(now),
        );
        task.text = request.text.as_deref().and_then(normalize_required);
        task.due_date = request.due_date.map(format_timestamp);
        task.priority = writable_priority(&request.priority);
        task.repeat = request
            .repeat
            .as_deref()
            .and_then(normalize_required)
            .unwrap_or_else(|| DEFAULT_REPEAT.to_string());
        task.sound = request
            .sound
            .as_deref()
            .and_then(normalize_required)
            .unwrap_or_else(|| DEFAULT_SOUND.to_string());

        let mut tasks = self.repo.load_tasks()?;
        tasks.push(task.clone());
        self.repo.save_tasks(&tasks)?;
        info!(
            "event=task_add module=service status=ok task_id={} list_id={} priority={}",
            task.id,
            task.list_id,
            task.priority.as_str()
        );
        Ok(task)
    }

    /// Replaces title, text, due date and priority of one task.
    pub fn edit_task(&self, task_id: &str, edit: &TaskEdit) -> ServiceResult<Task> {
        let title = normalize_required(&edit.title).ok_or(TaskServiceError::InvalidTitle)?;
        self.update_task(task_id, |task| {
            task.title = title;
            task.text = edit.text.as_deref().and_then(normalize_required);
            task.due_date = edit.due_date.map(format_timestamp);
            task.priority = writable_priority(&edit.priority);
        })
    }

    /// Flips completion; completing stamps `completed_at` with `now`.
    pub fn toggle_task(&self, task_id: &str, now: DateTime<Utc>) -> ServiceResult<Task> {
        let task = self.update_task(task_id, |task| {
            let completed = !task.completed;
            task.set_completed(completed, format_timestamp(now));
        })?;
        info!(
            "event=task_toggle module=service status=ok task_id={} completed={}",
            task.id, task.completed
        );
        Ok(task)
    }

    pub fn delete_task(&self, task_id: &str) -> ServiceResult<()> {
        let mut tasks = self.repo.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != task_id);
        if tasks.len() == before {
            return Err(TaskServiceError::TaskNotFound(task_id.to_string()));
        }
        self.repo.save_tasks(&tasks)?;
        Ok(())
    }

    /// Incomplete tasks across all lists, summary-ordered and capped at
    /// `SUMMARY_LIMIT`.
    pub fn home_summary(&self, now: DateTime<Utc>) -> ServiceResult<Vec<Task>> {
        let tasks = self.repo.load_tasks()?;
        let ordered = summary_order(&tasks, now).inspect_err(|err| {
            warn!("event=home_summary module=service status=error error={err}");
        })?;
        Ok(ordered
            .into_iter()
            .take(SUMMARY_LIMIT)
            .cloned()
            .collect())
    }

    /// All tasks of one list in detail order, each flagged when overdue.
    pub fn list_detail(&self, list_id: &str, now: DateTime<Utc>) -> ServiceResult<Vec<TaskRow>> {
        let lists = self.repo.load_lists()?;
        if !lists.iter().any(|list| list.id == list_id) {
            return Err(TaskServiceError::ListNotFound(list_id.to_string()));
        }

        let tasks = self
            .repo
            .load_tasks()?
            .into_iter()
            .filter(|task| task.list_id == list_id)
            .collect::<Vec<_>>();
        let ordered = detail_order(&tasks).inspect_err(|err| {
            warn!("event=list_detail module=service status=error list_id={list_id} error={err}");
        })?;
        Ok(ordered
            .into_iter()
            .map(|task| TaskRow {
                overdue: task.is_overdue(now),
                task: task.clone(),
            })
            .collect())
    }

    pub fn theme(&self) -> ServiceResult<ThemeMode> {
        Ok(self.repo.load_theme()?)
    }

    pub fn set_theme(&self, mode: ThemeMode) -> ServiceResult<ThemeMode> {
        self.repo.save_theme(mode)?;
        info!(
            "event=theme_set module=service status=ok theme={}",
            mode.as_str()
        );
        Ok(mode)
    }

    fn update_task(&self, task_id: &str, apply: impl FnOnce(&mut Task)) -> ServiceResult<Task> {
        let mut tasks = self.repo.load_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.to_string()))?;
        apply(task);
        let updated = task.clone();
        self.repo.save_tasks(&tasks)?;
        Ok(updated)
    }
}

fn new_id() -> TaskId {
    Uuid::new_v4().to_string()
}

fn normalize_required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Writes only ever persist the three real levels.
fn writable_priority(priority: &TaskPriority) -> TaskPriority {
    if priority.is_recognized() {
        priority.clone()
    } else {
        TaskPriority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_required, writable_priority};
    use crate::model::task::TaskPriority;

    #[test]
    fn normalize_required_trims_and_rejects_blank() {
        assert_eq!(normalize_required("  groceries "), Some("groceries".to_string()));
        assert_eq!(normalize_required(" \n "), None);
    }

    #[test]
    fn unrecognized_priority_is_written_as_medium() {
        assert_eq!(
            writable_priority(&TaskPriority::parse("asap")),
            TaskPriority::Medium
        );
        assert_eq!(writable_priority(&TaskPriority::High), TaskPriority::High);
    }
}
