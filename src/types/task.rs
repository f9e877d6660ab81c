//! Task record and the completion state machine.
//!
//! A [`Task`] is the sole persisted entity. Its completion state is derived
//! from `completed_at`: `null` means [`TaskStatus::Open`], any value means
//! [`TaskStatus::Completed`]. Completion is the only guarded transition --
//! title/description updates and deletion are legal from either state.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;

/// A single task record, as stored and as served on the wire.
///
/// Field names serialize exactly as persisted; `completed_at` serializes as
/// JSON `null` while the task is open.
///
/// # Examples
///
/// ```
/// use tasklite::Task;
///
/// let task = Task::new("Buy milk", "Two liters, whole");
/// assert!(task.completed_at.is_none());
/// assert_eq!(task.created_at, task.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-generated UUID, immutable after creation.
    pub id: String,

    /// Short task label. Non-empty.
    pub title: String,

    /// Longer task body. Non-empty.
    pub description: String,

    /// Completion timestamp. `None` while the task is open; once set it is
    /// never cleared or overwritten.
    pub completed_at: Option<String>,

    /// Set once at creation.
    pub created_at: String,

    /// Refreshed by every title/description update. Completion does not
    /// touch it.
    pub updated_at: String,
}

impl Task {
    /// Materializes a fresh task: new UUID, `completed_at = null`, and
    /// `created_at == updated_at` stamped from the same clock read.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            completed_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Current position in the completion state machine.
    pub fn status(&self) -> TaskStatus {
        if self.completed_at.is_some() {
            TaskStatus::Completed
        } else {
            TaskStatus::Open
        }
    }

    /// Checks that the completion transition is legal for this task.
    ///
    /// # Errors
    ///
    /// [`TaskError::AlreadyCompleted`] when `completed_at` is already set;
    /// the error carries the original completion timestamp so callers can
    /// surface it.
    pub fn validate_completion(&self) -> Result<(), TaskError> {
        match &self.completed_at {
            Some(at) => Err(TaskError::AlreadyCompleted {
                task_id: self.id.clone(),
                completed_at: at.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Completion state of a task.
///
/// # Examples
///
/// ```
/// use tasklite::TaskStatus;
///
/// assert!(TaskStatus::Open.can_transition_to(TaskStatus::Completed));
/// assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Open));
/// assert!(TaskStatus::Completed.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet completed; all operations are legal.
    Open,
    /// Completed. Terminal with respect to completion; still updatable and
    /// deletable.
    Completed,
}

impl TaskStatus {
    /// Whether this state admits no further completion transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// The only legal transition is `Open -> Completed`; self-transitions
    /// are rejected.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Open, Self::Completed))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// UTC now as an RFC 3339 string with millisecond precision and a `Z`
/// suffix. The fixed width makes these strings compare lexicographically in
/// chronological order.
pub(crate) fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A timestamp strictly greater than `previous`: the current clock when it
/// has advanced, otherwise `previous` plus one millisecond. Keeps
/// `updated_at` strictly increasing even for updates landing within one
/// clock tick.
pub(crate) fn timestamp_after(previous: &str) -> String {
    let now = current_timestamp();
    if now.as_str() > previous {
        return now;
    }
    match DateTime::parse_from_rfc3339(previous) {
        Ok(prev) => (prev + chrono::Duration::milliseconds(1))
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        Err(_) => now,
    }
}
