//! The five task operations.
//!
//! Each handler is a small struct owning its storage handle, bound to one
//! route by the server setup. Validation and state checks happen here, before
//! any storage write; the resulting [`TaskError`] values render to 400
//! responses in place. Only storage faults leave a handler as `Err`.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::{json, Value};

use crate::error::TaskError;
use crate::http::body::ParsedBody;
use crate::http::request::RequestContext;
use crate::http::response::{client_error, empty_response, json_response, HttpResponse};
use crate::http::router::RouteHandler;
use crate::store::{StoreError, TaskFilter, TaskStore};
use crate::types::task::{current_timestamp, timestamp_after};
use crate::types::Task;

/// Classification of a body field under the create rules.
enum BodyField {
    /// A non-empty string.
    Present(String),
    /// Absent, JSON `null`, or the empty string.
    Missing,
    /// Present with any other JSON type.
    WrongType,
}

fn string_field(body: &ParsedBody, name: &str) -> BodyField {
    match body.field(name) {
        Some(Value::String(s)) if !s.is_empty() => BodyField::Present(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => BodyField::Missing,
        Some(_) => BodyField::WrongType,
    }
}

/// A field under the update rules: supplied means a non-empty string,
/// anything else counts as absent.
fn supplied_field(body: &ParsedBody, name: &str) -> Option<String> {
    match string_field(body, name) {
        BodyField::Present(value) => Some(value),
        BodyField::Missing | BodyField::WrongType => None,
    }
}

/// A query value participates in the list filter only when non-empty.
fn filter_value(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn path_task_id(ctx: &RequestContext) -> String {
    ctx.param("id").unwrap_or_default().to_string()
}

/// `POST /tasks`: validates `title` and `description`, persists a fresh open
/// task, answers 201 with an empty body.
pub struct CreateTask {
    store: Arc<dyn TaskStore>,
}

impl CreateTask {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RouteHandler for CreateTask {
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
        let fields = (
            string_field(&ctx.body, "title"),
            string_field(&ctx.body, "description"),
        );
        let (title, description) = match fields {
            (BodyField::Present(title), BodyField::Present(description)) => (title, description),
            (BodyField::Missing, _) | (_, BodyField::Missing) => {
                return Ok(client_error(&TaskError::MissingRequiredFields));
            }
            _ => return Ok(client_error(&TaskError::InvalidFieldTypes)),
        };

        let task = Task::new(title, description);
        self.store.insert(&task).await?;
        tracing::debug!(task_id = %task.id, "task created");
        Ok(empty_response(StatusCode::CREATED))
    }
}

/// `GET /tasks`: lists tasks, optionally filtered by exact `title` and
/// `description` equality.
pub struct ListTasks {
    store: Arc<dyn TaskStore>,
}

impl ListTasks {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RouteHandler for ListTasks {
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
        let filter = TaskFilter {
            title: filter_value(ctx.query_value("title")),
            description: filter_value(ctx.query_value("description")),
        };
        let tasks = self.store.list(&filter).await?;
        Ok(json_response(StatusCode::OK, &json!({ "tasks": tasks })))
    }
}

/// `PUT /tasks/:id`: updates whichever of `title`/`description` the body
/// supplies, leaves the other untouched, and moves `updated_at` strictly
/// forward.
pub struct UpdateTask {
    store: Arc<dyn TaskStore>,
}

impl UpdateTask {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RouteHandler for UpdateTask {
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
        let task_id = path_task_id(&ctx);
        let title = supplied_field(&ctx.body, "title");
        let description = supplied_field(&ctx.body, "description");
        if title.is_none() && description.is_none() {
            return Ok(client_error(&TaskError::MissingUpdateFields));
        }

        let Some(existing) = self.store.get(&task_id).await? else {
            return Ok(client_error(&TaskError::NotFound { task_id }));
        };

        let updated_at = timestamp_after(&existing.updated_at);
        let title = title.unwrap_or(existing.title);
        let description = description.unwrap_or(existing.description);
        self.store
            .update_fields(&task_id, &title, &description, &updated_at)
            .await?;
        Ok(empty_response(StatusCode::NO_CONTENT))
    }
}

/// `DELETE /tasks/:id`: removes the task permanently.
pub struct DeleteTask {
    store: Arc<dyn TaskStore>,
}

impl DeleteTask {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RouteHandler for DeleteTask {
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
        let task_id = path_task_id(&ctx);
        if self.store.get(&task_id).await?.is_none() {
            return Ok(client_error(&TaskError::NotFound { task_id }));
        }

        self.store.delete(&task_id).await?;
        tracing::debug!(%task_id, "task deleted");
        Ok(empty_response(StatusCode::NO_CONTENT))
    }
}

/// `PATCH /tasks/:id/complete`: the one-way `Open -> Completed` transition.
/// Sets `completed_at` and nothing else; a second attempt is rejected with
/// the original completion timestamp.
pub struct CompleteTask {
    store: Arc<dyn TaskStore>,
}

impl CompleteTask {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RouteHandler for CompleteTask {
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
        let task_id = path_task_id(&ctx);
        let Some(task) = self.store.get(&task_id).await? else {
            return Ok(client_error(&TaskError::NotFound { task_id }));
        };

        if let Err(error) = task.validate_completion() {
            return Ok(client_error(&error));
        }

        let completed_at = current_timestamp();
        self.store.set_completed(&task_id, &completed_at).await?;
        tracing::debug!(%task_id, %completed_at, "task completed");
        Ok(empty_response(StatusCode::NO_CONTENT))
    }
}
