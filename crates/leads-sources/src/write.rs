//! Output writers: the merged contact CSV and the JSON run summary.

use std::io::Write;
use std::path::Path;

use leads_core::report::RunSummary;
use leads_core::MergedRecord;

use crate::SourceError;

/// Fixed column order of the output file.
pub const OUTPUT_HEADER: [&str; 3] = ["name", "email", "phone"];

/// Write `records` as CSV to `writer`. Absent fields are written as empty
/// cells.
pub fn write_contacts<W: Write>(writer: W, records: &[MergedRecord]) -> Result<(), SourceError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(OUTPUT_HEADER)?;
    for merged in records {
        let r = &merged.record;
        csv.write_record([
            r.name.as_deref().unwrap_or(""),
            r.email.as_deref().unwrap_or(""),
            r.phone.as_deref().unwrap_or(""),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `records` to `path`, creating its parent directory if needed.
pub fn write_contacts_file(path: &Path, records: &[MergedRecord]) -> Result<(), SourceError> {
    ensure_parent(path)?;
    let file = std::fs::File::create(path).map_err(|e| SourceError::io(path, e))?;
    write_contacts(std::io::BufWriter::new(file), records)?;
    tracing::debug!(path = %path.display(), records = records.len(), "wrote output");
    Ok(())
}

/// Write `summary` as pretty-printed JSON to `path`.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), SourceError> {
    ensure_parent(path)?;
    let file = std::fs::File::create(path).map_err(|e| SourceError::io(path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n").map_err(|e| SourceError::io(path, e))?;
    writer.flush().map_err(|e| SourceError::io(path, e))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), SourceError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))
        }
        _ => Ok(()),
    }
}
