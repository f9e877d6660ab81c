//! Task import file parsing.
//!
//! The import format is deliberately primitive: a fixed `title,description`
//! header line, then one task per line split on commas. No quoting, no
//! escaping. Columns beyond the second are ignored; a line with a single
//! column produces an empty description, which the API then rejects row by
//! row.

use serde::Serialize;
use thiserror::Error;

const EXPECTED_HEADER: &str = "title,description";

/// One row of an import file. Serializes as the create-request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub title: String,
    pub description: String,
}

/// Import file rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The first line was not exactly `title,description`.
    #[error("invalid import header: expected `title,description`, found `{found}`")]
    InvalidHeader {
        /// The header line actually read.
        found: String,
    },
}

/// Parses the full contents of an import file.
///
/// Empty lines are skipped; everything else becomes a [`TaskRecord`] by
/// position.
///
/// # Errors
///
/// [`ImportError::InvalidHeader`] when the first line is not the expected
/// header.
pub fn parse_import_file(contents: &str) -> Result<Vec<TaskRecord>, ImportError> {
    let mut lines = contents.lines();
    let header = lines.next().unwrap_or_default();
    if header != EXPECTED_HEADER {
        return Err(ImportError::InvalidHeader {
            found: header.to_string(),
        });
    }

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let mut columns = line.split(',');
        records.push(TaskRecord {
            title: columns.next().unwrap_or_default().to_string(),
            description: columns.next().unwrap_or_default().to_string(),
        });
    }
    Ok(records)
}
