//! Task list domain model.
//!
//! # Invariants
//! - `name` is non-blank after trim.
//! - A list owns its tasks by reference; deleting it deletes them.

use crate::model::task::TaskId;
use crate::model::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named container for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
}

impl TaskList {
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: created_at.into(),
        }
    }

    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}
