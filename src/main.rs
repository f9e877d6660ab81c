use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use http::Method;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tasklite::config::ServerConfig;
use tasklite::handlers::{CompleteTask, CreateTask, DeleteTask, ListTasks, UpdateTask};
use tasklite::http::{serve, Router};
use tasklite::store::{SqliteTaskStore, TaskStore};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ServerConfig::parse();
    let store: Arc<dyn TaskStore> = Arc::new(SqliteTaskStore::open(&config.database)?);
    tracing::info!(database = %config.database.display(), "task store ready");

    let router = Router::new()
        .route(Method::POST, "/tasks", CreateTask::new(Arc::clone(&store)))
        .route(Method::GET, "/tasks", ListTasks::new(Arc::clone(&store)))
        .route(Method::PUT, "/tasks/:id", UpdateTask::new(Arc::clone(&store)))
        .route(
            Method::DELETE,
            "/tasks/:id",
            DeleteTask::new(Arc::clone(&store)),
        )
        .route(
            Method::PATCH,
            "/tasks/:id/complete",
            CompleteTask::new(Arc::clone(&store)),
        );

    serve(router, config.bind_addr()).await?;
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
