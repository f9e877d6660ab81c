//! Domain error taxonomy for task operations.
//!
//! Every [`TaskError`] is a client-side rejection: the request was understood
//! but refused before (or instead of) mutating storage. All of them surface
//! as HTTP 400 with the `Display` text as the response message. Referencing a
//! missing task id is deliberately in this class rather than 404 -- the 404
//! status is reserved for unmatched routes.
//!
//! Storage faults are a separate type ([`StoreError`]) and the only error
//! class that crosses a handler boundary; see [`crate::store`].
//!
//! [`StoreError`]: crate::store::StoreError

use thiserror::Error;

/// Why a task operation was refused.
///
/// `Display` renders the exact message clients receive in the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Create was called without both required fields (absent, `null`, or
    /// empty string).
    #[error("The title and description parameters are required.")]
    MissingRequiredFields,

    /// Create was called with a non-string `title` or `description`.
    #[error("The title and description parameters must be of type string.")]
    InvalidFieldTypes,

    /// Update was called with neither `title` nor `description` supplied.
    #[error("The title or description parameters are required to update a task.")]
    MissingUpdateFields,

    /// The referenced task id has no row behind it. The wire message is
    /// intentionally fixed; the id travels with the error for callers that
    /// need it.
    #[error("Task id does not exists in database.")]
    NotFound {
        /// The id the client asked for.
        task_id: String,
    },

    /// Completion was requested for a task that is already completed. The
    /// message surfaces the original completion timestamp.
    #[error("The task was already completed at {completed_at}.")]
    AlreadyCompleted {
        /// The id the client asked for.
        task_id: String,
        /// When the task was first completed.
        completed_at: String,
    },
}
