use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tasklite::csv::parse_import_file;

/// One-shot bulk import: reads a CSV file and creates one task per row
/// against a running server.
#[derive(Debug, Parser)]
#[command(name = "import-tasks")]
#[command(about = "Imports tasks from a CSV file into a running server", long_about = None)]
#[command(version)]
struct ImportArgs {
    /// CSV file with a `title,description` header.
    file: PathBuf,

    /// Base URL of the server to import into.
    #[arg(long, env = "TASKLITE_SERVER", default_value = "http://127.0.0.1:3333")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = ImportArgs::parse();
    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let records = parse_import_file(&contents)?;
    tracing::info!(rows = records.len(), file = %args.file.display(), "import starting");

    let url = format!("{}/tasks", args.server.trim_end_matches('/'));
    let client = reqwest::Client::new();
    let mut created = 0usize;
    let mut rejected = 0usize;

    // Rows go up one at a time, in file order. Rejected rows are reported
    // and skipped, never retried.
    for record in &records {
        let response = client
            .post(&url)
            .json(record)
            .send()
            .await
            .with_context(|| format!("posting to {url}"))?;
        if response.status().is_success() {
            created += 1;
            tracing::debug!(title = %record.title, "row imported");
        } else {
            rejected += 1;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, title = %record.title, %body, "row rejected");
        }
    }

    tracing::info!(created, rejected, "import finished");
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
