//! Server configuration.

use std::path::PathBuf;

use clap::Parser;

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "tasklite")]
#[command(about = "Minimal task-management HTTP API", long_about = None)]
#[command(version)]
pub struct ServerConfig {
    /// Host to bind.
    #[arg(long, env = "TASKLITE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "TASKLITE_PORT", default_value_t = 3333)]
    pub port: u16,

    /// SQLite database file. Parent directories are created on first run.
    #[arg(long, env = "TASKLITE_DATABASE", default_value = "db/app.db")]
    pub database: PathBuf,
}

impl ServerConfig {
    /// The `host:port` pair to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
