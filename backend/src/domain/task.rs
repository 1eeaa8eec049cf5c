//! Task model.
//!
//! A task always belongs to exactly one user. The owner is fixed at creation
//! time and never changes afterwards; nothing on [`Task`] can reassign it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Every state, in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string names no known state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {value}")]
pub struct TaskStatusParseError {
    pub value: String,
}

impl FromStr for TaskStatus {
    type Err = TaskStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(TaskStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Interpret a submitted deadline.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (both read as
/// UTC) and whole seconds since the Unix epoch. Anything else, blanks
/// included, casts to no deadline rather than failing the payload.
///
/// # Examples
/// ```
/// use taskboard::domain::task::cast_deadline;
///
/// assert_eq!(
///     cast_deadline("0").map(|at| at.timestamp()),
///     Some(0)
/// );
/// assert_eq!(cast_deadline("next tuesday"), None);
/// ```
pub fn cast_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(at.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|at| at.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Unvalidated task payload as submitted by a client.
///
/// Every field is kept raw so the validation engine can report all problems
/// at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub content: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
}

/// Partial update for an existing task. `None` leaves the field untouched;
/// an empty `content` or `deadline` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
}

impl TaskChanges {
    /// Overlay these changes on `task`, yielding the full candidate payload.
    pub fn apply_to(&self, task: &Task) -> TaskDraft {
        TaskDraft {
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            content: match &self.content {
                Some(content) => Some(content.clone()),
                None => task.content.clone(),
            },
            status: Some(
                self.status
                    .clone()
                    .unwrap_or_else(|| task.status.as_str().to_owned()),
            ),
            deadline: match &self.deadline {
                Some(deadline) => Some(deadline.clone()),
                None => task
                    .deadline
                    .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            },
        }
    }
}

/// Task fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub content: Option<String>,
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    title: String,
    content: Option<String>,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task for `owner_id` from validated fields.
    pub fn new(id: TaskId, owner_id: UserId, fields: TaskFields) -> Self {
        let TaskFields {
            title,
            content,
            status,
            deadline,
        } = fields;
        Self {
            id,
            owner_id,
            title,
            content,
            status,
            deadline,
        }
    }

    /// Replace every editable field. Identity and owner are preserved.
    #[must_use]
    pub fn with_fields(self, fields: TaskFields) -> Self {
        Self::new(self.id, self.owner_id, fields)
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Whether `user` owns this task.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}
