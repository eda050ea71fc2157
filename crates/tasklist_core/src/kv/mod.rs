//! Flat key-value persistence boundary.
//!
//! # Responsibility
//! - Define the `get`/`set` contract the repository layer persists through.
//! - Keep the storage engine swappable behind one small trait.
//!
//! # Invariants
//! - `get` on a key never written returns `Ok(None)`, not an error.
//! - `set` replaces the whole value for a key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_kv;

pub use sqlite_kv::SqliteKvStore;

/// Key holding the JSON array of lists.
pub const LISTS_KEY: &str = "@lists";
/// Key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "@tasks";
/// Key holding the selected theme name.
pub const THEME_KEY: &str = "@theme";

pub type KvResult<T> = Result<T, KvError>;

#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Caller passed an empty or whitespace-only key.
    InvalidKey,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "key-value key must not be blank"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Minimal device storage contract.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }
}
