//! Core domain logic for the task lists app.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;

pub use kv::{KeyValueStore, KvError, KvResult, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::TaskList;
pub use model::task::{Task, TaskId, TaskPriority, TaskValidationError};
pub use model::theme::ThemeMode;
pub use model::timestamp::{format_timestamp, parse_timestamp};
pub use ordering::{detail_order, summary_order, OrderingError, OrderingResult};
pub use repo::task_repo::{KvTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::overview::{ListOverview, ProgressBand, RelativeAge, TaskRow};
pub use service::task_service::{
    NewTask, ServiceResult, TaskEdit, TaskService, TaskServiceError, SUMMARY_LIMIT,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
