//! Test builders: ergonomic constructors for records, source files and
//! aggregator runs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use leads_core::{Aggregator, NormalizedRecord, RunOutput, SourceFile};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for already-normalized [`NormalizedRecord`] fixtures.
///
/// ```rust
/// let jane = RecordBuilder::new()
///     .name("Jane Doe")
///     .email("jane@x.com")
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: NormalizedRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.record.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.record.phone = Some(phone.into());
        self
    }

    pub fn build(self) -> NormalizedRecord {
        self.record
    }
}

/// Shorthand for a record with every field optional.
pub fn record(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> NormalizedRecord {
    NormalizedRecord {
        name: name.map(str::to_string),
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Source files
// ---------------------------------------------------------------------------

/// Build an in-memory CSV file from a header and rows. Cells are joined with
/// commas as given, so quote them yourself if they contain commas.
pub fn csv_file(name: &str, header: &[&str], rows: &[&[&str]]) -> SourceFile {
    let mut contents = header.join(",");
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join(","));
        contents.push('\n');
    }
    SourceFile::new(name, contents)
}

/// Run a default-configured aggregator over `files`.
pub fn aggregate(files: Vec<SourceFile>) -> RunOutput {
    Aggregator::default().run(files)
}

/// Render merged records the way the output writer does.
pub fn render_output(output: &RunOutput) -> String {
    let mut buf = Vec::new();
    leads_sources::write_contacts(&mut buf, &output.records).expect("write to Vec cannot fail");
    String::from_utf8(buf).expect("output is UTF-8")
}
