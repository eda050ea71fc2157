//! Task/list repository contract and key-value implementation.
//!
//! # Invariants
//! - Each collection is stored whole as one JSON array under its key.
//! - Saves replace the full collection (no partial patches).

use crate::kv::{KeyValueStore, KvError, LISTS_KEY, TASKS_KEY, THEME_KEY};
use crate::model::list::TaskList;
use crate::model::task::Task;
use crate::model::theme::ThemeMode;
use log::warn;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    /// Stored value under `key` could not be decoded.
    InvalidData { key: &'static str, message: String },
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted data under `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::InvalidData { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface used by the task service.
pub trait TaskRepository {
    fn load_lists(&self) -> RepoResult<Vec<TaskList>>;
    fn save_lists(&self, lists: &[TaskList]) -> RepoResult<()>;
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
    fn load_theme(&self) -> RepoResult<ThemeMode>;
    fn save_theme(&self, mode: ThemeMode) -> RepoResult<()>;
}

/// Repository storing JSON documents in any `KeyValueStore`.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load_array<T: DeserializeOwned>(&self, key: &'static str) -> RepoResult<Vec<T>> {
        match self.store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|err| RepoError::InvalidData {
                    key,
                    message: err.to_string(),
                })
            }
            _ => Ok(Vec::new()),
        }
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn load_lists(&self) -> RepoResult<Vec<TaskList>> {
        self.load_array(LISTS_KEY)
    }

    fn save_lists(&self, lists: &[TaskList]) -> RepoResult<()> {
        let encoded = serde_json::to_string(lists)?;
        self.store.set(LISTS_KEY, &encoded)?;
        Ok(())
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        self.load_array(TASKS_KEY)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &encoded)?;
        Ok(())
    }

    fn load_theme(&self) -> RepoResult<ThemeMode> {
        let Some(raw) = self.store.get(THEME_KEY)? else {
            return Ok(ThemeMode::default());
        };
        match ThemeMode::parse(&raw) {
            Some(mode) => Ok(mode),
            None => {
                warn!("event=theme_load module=repo status=fallback reason=unknown_theme");
                Ok(ThemeMode::default())
            }
        }
    }

    fn save_theme(&self, mode: ThemeMode) -> RepoResult<()> {
        self.store.set(THEME_KEY, mode.as_str())?;
        Ok(())
    }
}
