//! A minimal task-management HTTP API on a hand-rolled dispatch engine.
//!
//! The service exposes five operations over plain HTTP/1.1 -- create, list
//! with exact-equality filtering, update, delete, and complete -- backed by a
//! single SQLite file. Routing, query parsing, and body handling live in this
//! crate rather than behind a framework: path templates compile into typed
//! matchers, and an ordered first-match router drives small handler objects
//! that own their storage handle.
//!
//! # Overview
//!
//! A task is created open (`completed_at = null`) and can be completed
//! exactly once; completion is terminal. Title and description stay editable
//! in either state, and every update moves `updated_at` strictly forward
//! while completion leaves it alone. All error responses share the
//! `{ "message": string }` body shape, and every response is typed
//! `application/json`.
//!
//! # Module Organization
//!
//! - [`types`] - The task record and its completion state machine
//! - [`error`] - Domain errors carrying their exact wire messages
//! - [`store`] - The storage trait plus SQLite and in-memory backends
//! - [`http`] - Route patterns, query parsing, body handling, dispatch, serving
//! - [`handlers`] - The five route handlers
//! - [`config`] - Server configuration from flags and environment
//! - [`csv`] - Import-file parsing for the bulk import tool
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use http::Method;
//! use tasklite::handlers::{CreateTask, ListTasks};
//! use tasklite::http::{serve, Router};
//! use tasklite::store::{SqliteTaskStore, TaskStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store: Arc<dyn TaskStore> = Arc::new(SqliteTaskStore::open("db/app.db")?);
//! let router = Router::new()
//!     .route(Method::POST, "/tasks", CreateTask::new(Arc::clone(&store)))
//!     .route(Method::GET, "/tasks", ListTasks::new(Arc::clone(&store)));
//! serve(router, "127.0.0.1:3333").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod handlers;
pub mod http;
pub mod store;
pub mod types;

// Re-exports for ergonomic access
pub use error::TaskError;
pub use self::http::{HttpResponse, ParsedBody, RequestContext, RouteHandler, Router};
pub use store::{InMemoryTaskStore, SqliteTaskStore, StoreError, TaskFilter, TaskStore};
pub use types::{Task, TaskStatus};
