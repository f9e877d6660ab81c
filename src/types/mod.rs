//! Domain types for the task API.

pub mod task;

pub use task::{Task, TaskStatus};
