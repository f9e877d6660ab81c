//! Thread-safe in-memory task store.
//!
//! Backs the test suites and ephemeral runs. Behavior mirrors
//! [`SqliteTaskStore`](crate::store::SqliteTaskStore) exactly: same filter
//! comparison semantics, same (`created_at`, `id`) list ordering, same
//! no-op-on-missing-row contract for mutations.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::store::{StoreError, TaskFilter, TaskStore};
use crate::types::Task;

/// In-memory [`TaskStore`] over a concurrent map keyed by task id.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: DashMap<String, Task>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks. Test helper.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no tasks are stored.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(tasks)
    }

    async fn get(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.get(task_id).map(|entry| entry.value().clone()))
    }

    async fn update_fields(
        &self,
        task_id: &str,
        title: &str,
        description: &str,
        updated_at: &str,
    ) -> Result<(), StoreError> {
        if let Some(mut entry) = self.tasks.get_mut(task_id) {
            entry.title = title.to_string();
            entry.description = description.to_string();
            entry.updated_at = updated_at.to_string();
        }
        Ok(())
    }

    async fn set_completed(&self, task_id: &str, completed_at: &str) -> Result<(), StoreError> {
        if let Some(mut entry) = self.tasks.get_mut(task_id) {
            entry.completed_at = Some(completed_at.to_string());
        }
        Ok(())
    }

    async fn delete(&self, task_id: &str) -> Result<(), StoreError> {
        self.tasks.remove(task_id);
        Ok(())
    }
}
