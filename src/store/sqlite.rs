//! SQLite-backed task store.
//!
//! Owns the one process-wide `rusqlite::Connection`, opened at startup and
//! shared by every request -- no pool. The connection sits behind a
//! `parking_lot::Mutex` and every call runs on the tokio blocking pool, so
//! request tasks never block the async loop on storage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};

use crate::store::{StoreError, TaskFilter, TaskStore};
use crate::types::Task;

const SCHEMA: &str = "\
create table if not exists tasks (
  id char(36) primary key,
  title text not null,
  description text not null,
  completed_at datetime null,
  created_at datetime not null,
  updated_at datetime not null
)";

const TASK_COLUMNS: &str = "id, title, description, completed_at, created_at, updated_at";

/// [`TaskStore`] over a single SQLite database file.
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// Opens (creating if absent) the database at `path` and ensures the
    /// `tasks` table exists. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] when the file cannot be opened or the schema
    /// statement fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::backend)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// Opens a private in-memory database. Used by tests.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] when SQLite refuses the connection.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || op(&conn.lock()))
            .await
            .map_err(|e| StoreError::backend(format!("storage worker failed: {e}")))?
            .map_err(StoreError::from)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed_at: row.get("completed_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let task = task.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "insert into tasks (id, title, description, completed_at, created_at, updated_at)
                 values (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    task.id,
                    task.title,
                    task.description,
                    task.completed_at,
                    task.created_at,
                    task.updated_at
                ],
            )
            .map(|_| ())
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            if filter.is_empty() {
                let mut stmt = conn.prepare(&format!(
                    "select {TASK_COLUMNS} from tasks order by created_at, id"
                ))?;
                let rows = stmt.query_map([], row_to_task)?;
                rows.collect()
            } else {
                // A missing filter side binds NULL; `column = NULL` matches
                // no row, so a one-sided filter yields an empty set.
                let mut stmt = conn.prepare(&format!(
                    "select {TASK_COLUMNS} from tasks
                     where title = ?1 and description = ?2
                     order by created_at, id"
                ))?;
                let rows = stmt.query_map(params![filter.title, filter.description], row_to_task)?;
                rows.collect()
            }
        })
        .await
    }

    async fn get(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        let task_id = task_id.to_string();
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare(&format!("select {TASK_COLUMNS} from tasks where id = ?1"))?;
            match stmt.query_row(params![task_id], row_to_task) {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
    }

    async fn update_fields(
        &self,
        task_id: &str,
        title: &str,
        description: &str,
        updated_at: &str,
    ) -> Result<(), StoreError> {
        let (task_id, title, description, updated_at) = (
            task_id.to_string(),
            title.to_string(),
            description.to_string(),
            updated_at.to_string(),
        );
        self.with_conn(move |conn| {
            conn.execute(
                "update tasks set title = ?1, description = ?2, updated_at = ?3 where id = ?4",
                params![title, description, updated_at, task_id],
            )
            .map(|_| ())
        })
        .await
    }

    async fn set_completed(&self, task_id: &str, completed_at: &str) -> Result<(), StoreError> {
        let (task_id, completed_at) = (task_id.to_string(), completed_at.to_string());
        self.with_conn(move |conn| {
            conn.execute(
                "update tasks set completed_at = ?1 where id = ?2",
                params![completed_at, task_id],
            )
            .map(|_| ())
        })
        .await
    }

    async fn delete(&self, task_id: &str) -> Result<(), StoreError> {
        let task_id = task_id.to_string();
        self.with_conn(move |conn| {
            conn.execute("delete from tasks where id = ?1", params![task_id])
                .map(|_| ())
        })
        .await
    }
}
