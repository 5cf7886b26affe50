//! Error kinds raised inside the pipeline.
//!
//! None of these abort a run. File-level errors skip one file; row-level
//! errors drop one row. Both end up in the run summary.

use serde::Serialize;
use thiserror::Error;

/// Why a whole input file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileError {
    /// The file could not be read or parsed as CSV.
    #[error("malformed file: {detail}")]
    MalformedFile { detail: String },

    /// Neither an email nor a phone column was recognised.
    #[error("insufficient identity columns")]
    InsufficientColumns { columns: Vec<String> },
}

impl FileError {
    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        FileError::MalformedFile {
            detail: detail.to_string(),
        }
    }
}

/// A row whose name, email and phone all failed normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("record has no valid name, email or phone")]
pub struct InvalidRecord;
