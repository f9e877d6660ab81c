//! Task storage collaborator: trait, list filter, and error type.
//!
//! # Architecture
//!
//! Handlers never talk to a database directly. They hold an
//! `Arc<dyn TaskStore>` injected at construction, and every call returns
//! `Result<_, StoreError>`. The store is deliberately dumb: validation, the
//! completion guard, and not-found detection all live in the handlers -- the
//! store only moves rows.
//!
//! # Implementations
//!
//! - [`SqliteTaskStore`] -- production store. One process-wide
//!   `rusqlite::Connection` opened at startup (no pool), guarded by a mutex,
//!   with each call run on the blocking pool.
//! - [`InMemoryTaskStore`] -- `DashMap`-backed store for tests and ephemeral
//!   runs. Mirrors the SQL comparison semantics exactly.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Task;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

/// A storage-layer failure.
///
/// The only error class that escapes a handler; the dispatcher turns it into
/// a single 500 response and logs the message. Client-visible bodies never
/// contain it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage engine reported a failure.
    #[error("storage backend error: {message}")]
    Backend {
        /// Engine-provided description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Wraps any displayable failure as a backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::backend(err)
    }
}

/// Exact-equality filter for [`TaskStore::list`].
///
/// Listing is unfiltered only when both fields are `None`. When at least one
/// is set, a task matches only if **both** fields compare equal -- a missing
/// side compares against nothing and excludes every row (the SQL rendition
/// binds NULL, and `column = NULL` is never true).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact title to match.
    pub title: Option<String>,
    /// Exact description to match.
    pub description: Option<String>,
}

impl TaskFilter {
    /// True when no filter value is set and listing returns everything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Whether `task` passes this filter. In-memory counterpart of the
    /// SQL `where title = ? and description = ?` comparison.
    pub fn matches(&self, task: &Task) -> bool {
        if self.is_empty() {
            return true;
        }
        self.title.as_deref() == Some(task.title.as_str())
            && self.description.as_deref() == Some(task.description.as_str())
    }
}

/// The storage operations the task handlers depend on.
///
/// Object-safe so the process-wide handle can be shared as
/// `Arc<dyn TaskStore>`. Implementations must be `Send + Sync`; calls from
/// concurrent requests may interleave freely.
///
/// Row existence is the caller's concern: `update_fields`, `set_completed`,
/// and `delete` leave missing rows untouched and still return `Ok`, exactly
/// like an SQL `UPDATE`/`DELETE` affecting zero rows.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a freshly created task.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure, including a duplicate
    /// id (ids are server-generated UUIDs, so collisions indicate a bug).
    async fn insert(&self, task: &Task) -> Result<(), StoreError>;

    /// Returns tasks passing `filter`, ordered by (`created_at`, `id`).
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Fetches one task by id, or `None` when no such row exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure.
    async fn get(&self, task_id: &str) -> Result<Option<Task>, StoreError>;

    /// Rewrites `title`, `description`, and `updated_at` for one row.
    /// `created_at` and `completed_at` are never touched by this call.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure.
    async fn update_fields(
        &self,
        task_id: &str,
        title: &str,
        description: &str,
        updated_at: &str,
    ) -> Result<(), StoreError>;

    /// Stamps `completed_at` for one row. Leaves `updated_at` alone.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure.
    async fn set_completed(&self, task_id: &str, completed_at: &str) -> Result<(), StoreError>;

    /// Removes one row permanently.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on any storage failure.
    async fn delete(&self, task_id: &str) -> Result<(), StoreError>;
}
