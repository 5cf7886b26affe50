//! Static CSV fixtures used across harnesses.
//!
//! Each fixture mimics an export from a different tool, with its own column
//! naming, so together they exercise the header resolver the way real input
//! directories do.

use std::path::Path;

use leads_core::SourceFile;

/// CRM export: English headers, formatted phones, mixed-case emails.
pub const CRM_EXPORT: &str = "\
Full Name,Email Address,Phone Number,Company
Jane Doe,Jane@X.com,555-1234,Acme
Robert Smith,rsmith@example.org,(415) 555-1212,Initech
Ana Lima,ana.lima@example.com.br,+55 11 91234-5678,
";

/// Newsletter signups: terse headers, short names, some duplicates of the CRM.
pub const NEWSLETTER: &str = "\
Contact,Mail,Mobile
J. Doe,JANE@X.COM,(555) 1234
R. Smith,RSmith@Example.org,
Carla Mendes,carla@example.pt,
";

/// Portuguese event list keyed on phone only.
pub const EVENT_SIGNUPS: &str = "\
Nome,Telefone,Cidade
Ana Beatriz Lima,+55 11 91234-5678,São Paulo
Pedro Alves,11 99876-5432,Campinas
,12-34,Santos
";

/// No email or phone column at all.
pub const NAMES_ONLY: &str = "\
Name,Company
Jane Doe,Acme
";

/// All fixtures, named so that file-name order is the order above.
pub fn sample_sources() -> Vec<SourceFile> {
    vec![
        SourceFile::new("01_crm.csv", CRM_EXPORT),
        SourceFile::new("02_newsletter.csv", NEWSLETTER),
        SourceFile::new("03_events.csv", EVENT_SIGNUPS),
        SourceFile::new("04_names.csv", NAMES_ONLY),
    ]
}

/// Write the sample fixtures into `dir` as real files.
pub fn write_sample_inputs(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for source in sample_sources() {
        std::fs::write(dir.join(&source.name), source.contents)?;
    }
    Ok(())
}
