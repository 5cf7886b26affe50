//! Aggregator: drives resolver → normalizer → merger over a run's files.
//!
//! Files are processed strictly in the order they are handed in. Each file is
//! parsed and normalized in full before any of its rows reach the merger, so
//! a file that fails half way leaves the merge map untouched.

use chrono::Utc;

use crate::error::FileError;
use crate::merger::{MergeOutcome, Merger};
use crate::normalizer::NormalizeRules;
use crate::report::{field_coverage, FileReport, ResolvedColumns, RunSummary, SkippedFile};
use crate::resolver::{resolve, AliasTable, HeaderMapping};
use crate::types::{MergedRecord, NormalizedRecord, SourceFile};

/// Final product of a run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Deduplicated contacts in first-seen order.
    pub records: Vec<MergedRecord>,
    pub summary: RunSummary,
}

pub struct Aggregator {
    aliases: AliasTable,
    rules: NormalizeRules,
    merger: Merger,
    files: Vec<FileReport>,
    skipped: Vec<SkippedFile>,
    started_at: chrono::DateTime<Utc>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AliasTable::default(), NormalizeRules::default())
    }
}

impl Aggregator {
    pub fn new(aliases: AliasTable, rules: NormalizeRules) -> Self {
        Self {
            aliases,
            rules,
            merger: Merger::new(),
            files: Vec::new(),
            skipped: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Process every file in order and return the merged result.
    pub fn run<I>(mut self, sources: I) -> RunOutput
    where
        I: IntoIterator<Item = SourceFile>,
    {
        self.ingest_all(sources.into_iter().map(Ok));
        self.finish()
    }

    /// Process sources in order. Sources that could not be loaded arrive as
    /// `Err` and are recorded as skipped, like files that fail to parse.
    pub fn ingest_all<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = Result<SourceFile, SkippedFile>>,
    {
        for source in sources {
            match source {
                // A failing file is recorded as skipped by `process`.
                Ok(file) => {
                    self.process(&file).ok();
                }
                Err(SkippedFile { file, reason }) => self.skip(&file, reason),
            }
        }
    }

    /// Process one file. On error the file is recorded as skipped and the
    /// merge map is unchanged.
    pub fn process(&mut self, source: &SourceFile) -> Result<FileReport, FileError> {
        tracing::info!(file = %source.name, "processing file");
        match self.extract(source) {
            Ok(extracted) => Ok(self.commit(source, extracted)),
            Err(err) => {
                self.skip(&source.name, err.clone());
                Err(err)
            }
        }
    }

    /// Record a file that never made it to parsing (e.g. unreadable on disk).
    pub fn skip(&mut self, file: &str, reason: FileError) {
        tracing::warn!(file, %reason, "skipping file");
        self.skipped.push(SkippedFile {
            file: file.to_string(),
            reason,
        });
    }

    pub fn merger(&self) -> &Merger {
        &self.merger
    }

    pub fn finish(self) -> RunOutput {
        let stats = self.merger.stats();
        let records = self.merger.into_records();
        let summary = RunSummary {
            started_at: self.started_at,
            finished_at: Utc::now(),
            files_processed: self.files.len(),
            total_contacts: self.files.iter().map(|f| f.rows_extracted).sum(),
            rows_rejected: self.files.iter().map(|f| f.rows_rejected).sum::<usize>()
                + stats.rejected,
            duplicates_removed: stats.duplicates_removed,
            unique_contacts: stats.unique,
            coverage: field_coverage(&records),
            files: self.files,
            skipped: self.skipped,
        };
        RunOutput { records, summary }
    }

    fn extract(&self, source: &SourceFile) -> Result<Extracted, FileError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(source.contents.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| FileError::malformed(format!("failed to read header row: {e}")))?
            .clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(FileError::malformed("missing header row"));
        }

        let rows = reader
            .records()
            .enumerate()
            .map(|(i, row)| {
                row.map_err(|e| FileError::malformed(format!("failed to parse row {}: {e}", i + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let columns: Vec<&str> = headers.iter().collect();
        let mapping = resolve(&self.aliases, &columns)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = 0;
        for row in &rows {
            match self.rules.normalize(&mapping.extract(row)) {
                Ok(record) => records.push(record),
                Err(_) => rejected += 1,
            }
        }

        Ok(Extracted {
            rows_found: rows.len(),
            rows_rejected: rejected,
            records,
            mapping,
        })
    }

    fn commit(&mut self, source: &SourceFile, extracted: Extracted) -> FileReport {
        let Extracted {
            rows_found,
            rows_rejected,
            records,
            mapping,
        } = extracted;

        log_mapping(&source.name, &mapping);

        let rows_extracted = records.len();
        for record in records {
            if let MergeOutcome::Merged { updated } = self.merger.ingest(record) {
                if !updated.is_empty() {
                    tracing::debug!(file = %source.name, ?updated, "enriched existing contact");
                }
            }
        }

        tracing::info!(
            file = %source.name,
            rows_found,
            rows_extracted,
            rows_rejected,
            "extracted contacts"
        );

        let report = FileReport {
            file: source.name.clone(),
            rows_found,
            rows_extracted,
            rows_rejected,
            columns: ResolvedColumns {
                name: mapping.name.map(|c| c.header),
                email: mapping.email.map(|c| c.header),
                phone: mapping.phone.map(|c| c.header),
                unused: mapping.unused.into_iter().map(|u| u.column.header).collect(),
            },
        };
        self.files.push(report.clone());
        report
    }
}

struct Extracted {
    rows_found: usize,
    rows_rejected: usize,
    records: Vec<NormalizedRecord>,
    mapping: HeaderMapping,
}

fn log_mapping(file: &str, mapping: &HeaderMapping) {
    tracing::info!(
        file,
        name_column = mapping.name.as_ref().map(|c| c.header.as_str()),
        email_column = mapping.email.as_ref().map(|c| c.header.as_str()),
        phone_column = mapping.phone.as_ref().map(|c| c.header.as_str()),
        "resolved columns"
    );
    for unused in &mapping.unused {
        tracing::info!(
            file,
            column = %unused.column.header,
            field = %unused.field,
            "ignoring additional column; an earlier column already supplies this field"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str, contents: &str) -> SourceFile {
        SourceFile::new(name, contents)
    }

    #[test]
    fn single_file_counts() {
        let mut agg = Aggregator::default();
        let report = agg
            .process(&file(
                "a.csv",
                "Name,Email,Phone\nJane Doe,jane@x.com,555-1234\n,not-an-email,\nBob,bob@x.com,\n",
            ))
            .unwrap();
        assert_eq!(report.rows_found, 3);
        assert_eq!(report.rows_extracted, 2);
        assert_eq!(report.rows_rejected, 1);
        assert_eq!(report.columns.email.as_deref(), Some("Email"));
    }

    #[test]
    fn two_files_merge_into_one_contact() {
        let output = Aggregator::default().run([
            file("a.csv", "name,email,phone\nJane Doe,jane@x.com,555-1234\n"),
            file("b.csv", "name,email,phone\nJ. Doe,JANE@X.COM,(555) 1234\n"),
        ]);
        assert_eq!(output.records.len(), 1);
        let jane = &output.records[0].record;
        assert_eq!(jane.name.as_deref(), Some("Jane Doe"));
        assert_eq!(jane.email.as_deref(), Some("jane@x.com"));
        assert_eq!(jane.phone.as_deref(), Some("5551234"));
        assert_eq!(output.summary.duplicates_removed, 1);
        assert_eq!(output.summary.unique_contacts, 1);
        assert_eq!(output.summary.total_contacts, 2);
    }

    #[test]
    fn insufficient_columns_file_is_skipped() {
        let output = Aggregator::default().run([
            file("names.csv", "Name,Company\nJane,Acme\n"),
            file("ok.csv", "Email\njane@x.com\n"),
        ]);
        assert_eq!(output.summary.files_processed, 1);
        assert_eq!(output.summary.files_skipped(), 1);
        let skipped = &output.summary.skipped[0];
        assert_eq!(skipped.file, "names.csv");
        assert_eq!(skipped.reason.to_string(), "insufficient identity columns");
        assert_eq!(output.records.len(), 1);
    }

    #[test]
    fn empty_file_is_malformed() {
        let mut agg = Aggregator::default();
        let err = agg.process(&file("empty.csv", "")).unwrap_err();
        assert!(matches!(err, FileError::MalformedFile { .. }));
        assert!(agg.merger().is_empty());
    }

    #[test]
    fn header_only_file_is_processed_with_no_rows() {
        let output = Aggregator::default().run([file("h.csv", "name,email,phone\n")]);
        assert_eq!(output.summary.files_processed, 1);
        assert_eq!(output.summary.files[0].rows_found, 0);
        assert!(output.records.is_empty());
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let output = Aggregator::default().run([file(
            "r.csv",
            "name,email,phone,notes\nJane,jane@x.com\nBob,bob@x.com,5551234,vip,extra\n",
        )]);
        assert_eq!(output.summary.total_contacts, 2);
        assert_eq!(output.records[0].record.phone, None);
        assert_eq!(output.records[1].record.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn unused_columns_are_reported() {
        let mut agg = Aggregator::default();
        let report = agg
            .process(&file("u.csv", "Email,Phone,Mobile\na@x.com,5551234,5559876\n"))
            .unwrap();
        assert_eq!(report.columns.phone.as_deref(), Some("Phone"));
        assert_eq!(report.columns.unused, vec!["Mobile".to_string()]);
    }

    #[test]
    fn unloadable_sources_share_the_skip_path() {
        let mut agg = Aggregator::default();
        agg.ingest_all([
            Err(SkippedFile {
                file: "locked.csv".into(),
                reason: FileError::malformed("permission denied"),
            }),
            Ok(file("names.csv", "Name\nJane\n")),
            Ok(file("ok.csv", "Email\njane@x.com\n")),
        ]);
        let output = agg.finish();
        let skipped: Vec<_> = output.summary.skipped.iter().map(|s| s.file.as_str()).collect();
        assert_eq!(skipped, vec!["locked.csv", "names.csv"]);
        assert_eq!(output.summary.files_processed, 1);
        assert_eq!(output.records.len(), 1);
    }

    #[test]
    fn explicit_skip_is_recorded() {
        let mut agg = Aggregator::default();
        agg.skip("locked.csv", FileError::malformed("permission denied"));
        let output = agg.finish();
        assert_eq!(output.summary.skipped.len(), 1);
        assert_eq!(output.summary.files_processed, 0);
    }

    #[test]
    fn dedup_count_invariant_holds() {
        let output = Aggregator::default().run([
            file("a.csv", "email,phone\na@x.com,5551234\nb@x.com,\n,5559876\n"),
            file("b.csv", "phone,email\n5559876,\n555 1234,a@x.com\n,b@x.com\nnope,nope\n"),
        ]);
        let s = &output.summary;
        assert_eq!(s.unique_contacts + s.duplicates_removed, s.total_contacts);
        assert_eq!(s.unique_contacts, output.records.len());
        assert_eq!(s.rows_rejected, 1);
    }
}
