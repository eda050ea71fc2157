//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, screen-level functions to Dart via FRB.
//! - Own the clock: every call stamps `now` from the system time.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Instants cross the boundary as Unix epoch milliseconds.
//! - Failures are reported through `ok=false` envelopes, never thrown.

use chrono::{DateTime, Utc};
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_timestamp,
    ping as ping_inner, KvTaskRepository, ListOverview, NewTask, ProgressBand, RelativeAge,
    ServiceResult, SqliteKvStore, Task, TaskEdit, TaskPriority, TaskService, ThemeMode,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "tasklist.sqlite3";
const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type EntryService<'conn> = TaskService<KvTaskRepository<SqliteKvStore<'conn>>>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created or touched list/task.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Task row for summary and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub list_id: String,
    pub title: String,
    pub text: Option<String>,
    pub completed: bool,
    /// `low|medium|high`; stored oddities render as `low`.
    pub priority: String,
    pub due_epoch_ms: Option<i64>,
    pub completed_epoch_ms: Option<i64>,
    pub overdue: bool,
    pub repeat: String,
    pub sound: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksResponse {
    pub ok: bool,
    pub items: Vec<TaskItem>,
    pub message: String,
}

/// List card for the lists screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub list_id: String,
    pub name: String,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_percent: u8,
    /// `low|medium|high|complete`.
    pub progress_band: String,
    /// Compact age (`now`, `42s`, `5m`, `3h`, `2d`); `None` when unknown.
    pub age_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListsResponse {
    pub ok: bool,
    pub items: Vec<ListItem>,
    pub message: String,
}

/// Creates a list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_create(name: String) -> ActionResponse {
    match with_task_service(|service| service.create_list(&name, Utc::now())) {
        Ok(list) => ActionResponse::success("List created.", Some(list.id)),
        Err(err) => ActionResponse::failure(format!("list_create failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_rename(list_id: String, name: String) -> ActionResponse {
    match with_task_service(|service| service.rename_list(&list_id, &name)) {
        Ok(list) => ActionResponse::success("List renamed.", Some(list.id)),
        Err(err) => ActionResponse::failure(format!("list_rename failed: {err}")),
    }
}

/// Deletes a list together with its tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn list_delete(list_id: String) -> ActionResponse {
    match with_task_service(|service| service.delete_list(&list_id)) {
        Ok(removed) => ActionResponse::success(
            format!("List deleted with {removed} task(s)."),
            Some(list_id),
        ),
        Err(err) => ActionResponse::failure(format!("list_delete failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn lists_overview() -> ListsResponse {
    match with_task_service(|service| service.list_overviews(Utc::now())) {
        Ok(overviews) => ListsResponse {
            ok: true,
            message: format!("Loaded {} list(s).", overviews.len()),
            items: overviews.into_iter().map(to_list_item).collect(),
        },
        Err(err) => ListsResponse {
            ok: false,
            items: Vec::new(),
            message: format!("lists_overview failed: {err}"),
        },
    }
}

/// Adds a task from the "new task" form.
///
/// # FFI contract
/// - Blank `priority` means `medium`; other unknown values are rejected.
/// - `due_epoch_ms = None` means no deadline.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    list_id: String,
    title: String,
    text: Option<String>,
    due_epoch_ms: Option<i64>,
    priority: String,
    repeat: Option<String>,
    sound: Option<String>,
) -> ActionResponse {
    let request = match (parse_priority(&priority), parse_due(due_epoch_ms)) {
        (Ok(priority), Ok(due_date)) => NewTask {
            list_id,
            title,
            text,
            due_date,
            priority,
            repeat,
            sound,
        },
        (Err(message), _) | (_, Err(message)) => {
            return ActionResponse::failure(format!("task_add failed: {message}"));
        }
    };
    match with_task_service(|service| service.add_task(&request, Utc::now())) {
        Ok(task) => ActionResponse::success("Task created.", Some(task.id)),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Replaces title, text, due date and priority of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(
    task_id: String,
    title: String,
    text: Option<String>,
    due_epoch_ms: Option<i64>,
    priority: String,
) -> ActionResponse {
    let edit = match (parse_priority(&priority), parse_due(due_epoch_ms)) {
        (Ok(priority), Ok(due_date)) => TaskEdit {
            title,
            text,
            due_date,
            priority,
        },
        (Err(message), _) | (_, Err(message)) => {
            return ActionResponse::failure(format!("task_edit failed: {message}"));
        }
    };
    match with_task_service(|service| service.edit_task(&task_id, &edit)) {
        Ok(task) => ActionResponse::success("Task updated.", Some(task.id)),
        Err(err) => ActionResponse::failure(format!("task_edit failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> ActionResponse {
    match with_task_service(|service| service.toggle_task(&task_id, Utc::now())) {
        Ok(task) if task.completed => ActionResponse::success("Task completed.", Some(task.id)),
        Ok(task) => ActionResponse::success("Task reopened.", Some(task.id)),
        Err(err) => ActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    match with_task_service(|service| service.delete_task(&task_id)) {
        Ok(()) => ActionResponse::success("Task deleted.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Home overview: up to 7 incomplete tasks, overdue first.
#[flutter_rust_bridge::frb(sync)]
pub fn home_summary() -> TasksResponse {
    let now = Utc::now();
    let result = with_task_service(|service| service.home_summary(now)).map(|tasks| {
        tasks
            .into_iter()
            .map(|task| {
                let overdue = task.is_overdue(now);
                to_task_item(task, overdue)
            })
            .collect()
    });
    to_tasks_response("home_summary", result)
}

/// All tasks of one list, completed last.
#[flutter_rust_bridge::frb(sync)]
pub fn list_detail(list_id: String) -> TasksResponse {
    let result = with_task_service(|service| service.list_detail(&list_id, Utc::now())).map(
        |rows| {
            rows.into_iter()
                .map(|row| to_task_item(row.task, row.overdue))
                .collect()
        },
    );
    to_tasks_response("list_detail", result)
}

/// Returns the stored theme name (`light|dark|darker`), `light` on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> String {
    with_task_service(|service| service.theme())
        .unwrap_or_default()
        .as_str()
        .to_string()
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_set(theme: String) -> ActionResponse {
    let Some(mode) = ThemeMode::parse(&theme) else {
        return ActionResponse::failure(format!("theme_set failed: unknown theme `{theme}`"));
    };
    match with_task_service(|service| service.set_theme(mode)) {
        Ok(mode) => ActionResponse::success(format!("Theme set to {}.", mode.as_str()), None),
        Err(err) => ActionResponse::failure(format!("theme_set failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_task_service<T>(
    f: impl FnOnce(&EntryService<'_>) -> ServiceResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let service = TaskService::new(KvTaskRepository::new(SqliteKvStore::new(&conn)));
    f(&service).map_err(|err| err.to_string())
}

fn parse_priority(value: &str) -> Result<TaskPriority, String> {
    if value.trim().is_empty() {
        return Ok(TaskPriority::Medium);
    }
    let priority = TaskPriority::parse(value);
    if priority.is_recognized() {
        Ok(priority)
    } else {
        Err(format!("unsupported priority `{}`", value.trim()))
    }
}

fn parse_due(due_epoch_ms: Option<i64>) -> Result<Option<DateTime<Utc>>, String> {
    due_epoch_ms
        .map(|millis| {
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| format!("due date out of range: {millis}"))
        })
        .transpose()
}

fn to_epoch_ms(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_timestamp)
        .map(|value| value.timestamp_millis())
}

fn to_task_item(task: Task, overdue: bool) -> TaskItem {
    let priority = if task.priority.is_recognized() {
        task.priority.as_str()
    } else {
        TaskPriority::Low.as_str()
    };
    TaskItem {
        due_epoch_ms: to_epoch_ms(task.due_date.as_deref()),
        completed_epoch_ms: to_epoch_ms(task.completed_at.as_deref()),
        priority: priority.to_string(),
        task_id: task.id,
        list_id: task.list_id,
        title: task.title,
        text: task.text,
        completed: task.completed,
        overdue,
        repeat: task.repeat,
        sound: task.sound,
    }
}

fn to_tasks_response(operation: &str, result: Result<Vec<TaskItem>, String>) -> TasksResponse {
    match result {
        Ok(items) => TasksResponse {
            ok: true,
            message: if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("Loaded {} task(s).", items.len())
            },
            items,
        },
        Err(err) => TasksResponse {
            ok: false,
            items: Vec::new(),
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn to_list_item(overview: ListOverview) -> ListItem {
    ListItem {
        list_id: overview.list.id,
        name: overview.list.name,
        total_tasks: u32::try_from(overview.total_tasks).unwrap_or(u32::MAX),
        completed_tasks: u32::try_from(overview.completed_tasks).unwrap_or(u32::MAX),
        completion_percent: overview.completion_percent,
        progress_band: progress_band_label(overview.band).to_string(),
        age_label: overview.age.map(age_label),
    }
}

fn progress_band_label(band: ProgressBand) -> &'static str {
    match band {
        ProgressBand::Low => "low",
        ProgressBand::Medium => "medium",
        ProgressBand::High => "high",
        ProgressBand::Complete => "complete",
    }
}

fn age_label(age: RelativeAge) -> String {
    match age {
        RelativeAge::JustNow => "now".to_string(),
        RelativeAge::Seconds(value) => format!("{value}s"),
        RelativeAge::Minutes(value) => format!("{value}m"),
        RelativeAge::Hours(value) => format!("{value}h"),
        RelativeAge::Days(value) => format!("{value}d"),
    }
}
