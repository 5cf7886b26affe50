//! leads-sources: file-system adapters for leads-unifier.
//!
//! Finds input files, reads them into [`leads_core::SourceFile`] values for
//! the aggregator, and writes the merged contacts and run summary back out.

pub mod discover;
pub mod read;
pub mod write;

use std::path::PathBuf;

use thiserror::Error;

pub use discover::{discover, InputPattern};
pub use read::CsvFile;
pub use write::{write_contacts, write_contacts_file, write_summary_json, OUTPUT_HEADER};

/// Anything the aggregator can pull a [`leads_core::SourceFile`] from.
pub trait ContactSource {
    /// Name shown in logs and the run summary.
    fn name(&self) -> String;

    fn load(&self) -> Result<leads_core::SourceFile, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("invalid input pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}
