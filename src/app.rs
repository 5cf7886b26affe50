//! One end-to-end run: discover → read → aggregate → write → report.

use std::path::{Path, PathBuf};

use anyhow::Context;
use leads_core::config::Config;
use leads_core::report::{RunSummary, SkippedFile};
use leads_core::{Aggregator, FileError, MergedRecord};
use leads_sources::{
    discover, write_contacts_file, write_summary_json, ContactSource, CsvFile, InputPattern,
    SourceError,
};

/// Number of merged records echoed to the log at the end of a run.
const SAMPLE_SIZE: usize = 5;

/// Per-invocation options that are not part of [`Config`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Also write the run summary as JSON to this path.
    pub summary_json: Option<PathBuf>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Output written.
    Completed(RunSummary),
    /// The input directory did not exist and has been created empty.
    InputDirCreated(PathBuf),
    /// The input directory holds no matching files. Nothing was written.
    NoInputFiles,
}

pub fn run(config: &Config, options: &RunOptions) -> anyhow::Result<RunStatus> {
    let input_dir = &config.input.dir;
    let pattern = InputPattern::new(&config.input.pattern)?;

    let paths = match discover(input_dir, &pattern) {
        Ok(paths) => paths,
        Err(SourceError::MissingDirectory(dir)) => {
            tracing::error!(dir = %dir.display(), "input directory not found; creating it");
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create input directory {}", dir.display()))?;
            tracing::info!("place your CSV files in {} and run again", dir.display());
            return Ok(RunStatus::InputDirCreated(dir));
        }
        Err(err) => return Err(err).context("failed to list input files"),
    };

    if paths.is_empty() {
        tracing::error!(
            dir = %input_dir.display(),
            pattern = pattern.as_str(),
            "no input files found"
        );
        tracing::info!("place your CSV files in {} and run again", input_dir.display());
        return Ok(RunStatus::NoInputFiles);
    }

    let total = paths.len();
    let mut aggregator = Aggregator::new(config.alias_table(), config.normalize_rules());
    aggregator.ingest_all(paths.into_iter().enumerate().map(|(i, path)| {
        let source = CsvFile::new(path);
        tracing::info!(progress = %format!("{}/{total}", i + 1), file = %source.name(), "reading");
        source.load().map_err(|err| SkippedFile {
            file: source.name(),
            reason: FileError::malformed(err),
        })
    }));

    let output = aggregator.finish();
    let out_path = &config.output.file;
    write_contacts_file(out_path, &output.records)
        .with_context(|| format!("failed to write output file {}", out_path.display()))?;

    if let Some(path) = &options.summary_json {
        write_summary_json(path, &output.summary)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
    }

    log_summary(&output.summary, out_path);
    log_sample(&output.records);
    Ok(RunStatus::Completed(output.summary))
}

fn log_summary(summary: &RunSummary, out_path: &Path) {
    tracing::info!("processing complete");
    tracing::info!(
        files_processed = summary.files_processed,
        files_skipped = summary.files_skipped(),
        total_contacts = summary.total_contacts,
        rows_rejected = summary.rows_rejected,
        duplicates_removed = summary.duplicates_removed,
        unique_contacts = summary.unique_contacts,
        output = %out_path.display(),
        "run summary"
    );
    for skipped in &summary.skipped {
        tracing::warn!(file = %skipped.file, reason = %skipped.reason, "skipped file");
    }
    for c in &summary.coverage {
        tracing::info!(
            field = %c.field,
            filled = c.filled,
            "{}: {} filled values ({:.1}%)",
            c.field,
            c.filled,
            c.percent
        );
    }
}

fn log_sample(records: &[MergedRecord]) {
    if records.is_empty() {
        return;
    }
    tracing::info!("sample of processed data:");
    for merged in records.iter().take(SAMPLE_SIZE) {
        let r = &merged.record;
        tracing::info!(
            "  {} | {} | {} (from {} record(s))",
            r.name.as_deref().unwrap_or("-"),
            r.email.as_deref().unwrap_or("-"),
            r.phone.as_deref().unwrap_or("-"),
            merged.contributions
        );
    }
}
