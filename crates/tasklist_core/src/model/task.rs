//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its priority scale.
//! - Provide identity validation used by ordering and storage paths.
//!
//! # Invariants
//! - `id` and `list_id` are non-blank for every well-formed task.
//! - `completed_at` is only meaningful while `completed == true`.
//! - Unknown priority values never fail deserialization; they decode to
//!   `TaskPriority::Unrecognized`, rank with `Low` and are written back as
//!   stored.
//! - Timestamp fields never fail deserialization: a non-string value reads
//!   as absent (`createdAt` as empty text).
//! - Fields outside the record below are dropped when a collection is
//!   re-saved.

use crate::model::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable string identifier for tasks and lists.
pub type TaskId = String;

pub const DEFAULT_REPEAT: &str = "never";
pub const DEFAULT_SOUND: &str = "default";

/// Task urgency as chosen in the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    /// Stored value outside `low|medium|high`, kept verbatim.
    Unrecognized(Value),
}

impl TaskPriority {
    /// Parses form or storage text. Case and surrounding whitespace are ignored.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unrecognized(Value::String(value.to_string())),
        }
    }

    /// Sort rank, lower sorts first. Unrecognized ranks with `Low`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low | Self::Unrecognized(_) => 2,
        }
    }

    /// Log/display label; unknown values all read as `unrecognized`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Serialize for TaskPriority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unrecognized(raw) => raw.serialize(serializer),
            known => serializer.serialize_str(known.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Any JSON shape is accepted; only known strings map to real levels.
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::String(value) => Self::parse(&value),
            other => Self::Unrecognized(other),
        })
    }
}

/// Identity/content violations for task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    MissingId,
    MissingListId,
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "task id is missing"),
            Self::MissingListId => write!(f, "task listId is missing"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    #[serde(default)]
    pub list_id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub text: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub completed_at: Option<String>,
    /// Raw RFC 3339 text; malformed strings are kept and read as "no deadline".
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default = "default_repeat")]
    pub repeat: String,
    #[serde(default = "default_sound")]
    pub sound: String,
}

impl Task {
    /// Builds an incomplete task with default options.
    pub fn new(
        id: impl Into<TaskId>,
        list_id: impl Into<TaskId>,
        title: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            title: title.into(),
            text: None,
            completed: false,
            created_at: created_at.into(),
            completed_at: None,
            due_date: None,
            priority: TaskPriority::Medium,
            repeat: default_repeat(),
            sound: default_sound(),
        }
    }

    /// Checks the identity fields every consumer relies on.
    pub fn validate_identity(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::MissingId);
        }
        if self.list_id.trim().is_empty() {
            return Err(TaskValidationError::MissingListId);
        }
        Ok(())
    }

    /// Full write-path validation: identity plus a non-blank title.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        self.validate_identity()?;
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Parsed due date, `None` when absent or malformed.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_timestamp)
    }

    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn completed_at_parsed(&self) -> Option<DateTime<Utc>> {
        self.completed_at.as_deref().and_then(parse_timestamp)
    }

    /// Overdue means incomplete with a parseable due date strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_at().is_some_and(|due| due < now)
    }

    /// Flips completion, stamping or clearing `completed_at`.
    pub fn set_completed(&mut self, completed: bool, stamp: impl Into<String>) {
        self.completed = completed;
        self.completed_at = if completed { Some(stamp.into()) } else { None };
    }
}

/// String values pass through; any other JSON shape reads as empty text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

fn default_repeat() -> String {
    DEFAULT_REPEAT.to_string()
}

fn default_sound() -> String {
    DEFAULT_SOUND.to_string()
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPriority, TaskValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn priority_parse_is_lenient() {
        assert_eq!(TaskPriority::parse(" HIGH "), TaskPriority::High);
        let urgent = TaskPriority::parse("urgent");
        assert!(!urgent.is_recognized());
        assert_eq!(urgent.rank(), TaskPriority::Low.rank());
        assert_eq!(urgent.as_str(), "unrecognized");
    }

    #[test]
    fn validate_identity_reports_first_missing_field() {
        let mut task = Task::new("", "list-1", "title", "2026-01-01T00:00:00Z");
        assert_eq!(
            task.validate_identity(),
            Err(TaskValidationError::MissingId)
        );
        task.id = "t-1".to_string();
        task.list_id = "  ".to_string();
        assert_eq!(
            task.validate_identity(),
            Err(TaskValidationError::MissingListId)
        );
    }

    #[test]
    fn overdue_requires_parseable_past_due_date_and_incomplete() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        let mut task = Task::new("t-1", "l-1", "pay rent", "2026-05-01T00:00:00Z");
        task.due_date = Some("2026-05-09T00:00:00Z".to_string());
        assert!(task.is_overdue(now));

        task.set_completed(true, "2026-05-10T11:00:00Z");
        assert!(!task.is_overdue(now));

        task.set_completed(false, "ignored");
        assert_eq!(task.completed_at, None);
        task.due_date = Some("not a date".to_string());
        assert!(!task.is_overdue(now));
    }
}
