//! Run summary handed to the reporting layer at the end of a run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::FileError;
use crate::types::{Field, MergedRecord};

/// Counts for one successfully processed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    /// Data rows in the file (header excluded).
    pub rows_found: usize,
    /// Rows that produced a valid contact.
    pub rows_extracted: usize,
    /// Rows where every field failed normalization.
    pub rows_rejected: usize,
    /// Header text of the columns used for name, email and phone.
    pub columns: ResolvedColumns,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub unused: Vec<String>,
}

/// A file that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: FileError,
}

/// Filled-value statistics for one canonical field in the final set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldCoverage {
    pub field: Field,
    pub filled: usize,
    pub percent: f64,
}

/// Everything the reporting layer needs once the run is done.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files_processed: usize,
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
    pub total_contacts: usize,
    pub rows_rejected: usize,
    pub duplicates_removed: usize,
    pub unique_contacts: usize,
    pub coverage: Vec<FieldCoverage>,
}

impl RunSummary {
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Per-field filled counts over `records`, in [`Field::ALL`] order.
pub fn field_coverage(records: &[MergedRecord]) -> Vec<FieldCoverage> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let filled = records
                .iter()
                .filter(|m| m.record.get(field).is_some())
                .count();
            let percent = if records.is_empty() {
                0.0
            } else {
                filled as f64 * 100.0 / records.len() as f64
            };
            FieldCoverage {
                field,
                filled,
                percent,
            }
        })
        .collect()
}
