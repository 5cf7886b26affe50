//! Domain-specific assertion macros for leads-unifier harnesses.
//!
//! These add context-rich failure messages that make it clear which merge or
//! summary invariant was violated.

use leads_core::report::RunSummary;
use leads_core::MergedRecord;

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that the merged set contains a contact with the given email whose
/// name and phone match.
///
/// ```rust
/// assert_contact!(output.records, "jane@x.com", name: Some("Jane Doe"), phone: Some("5551234"));
/// ```
#[macro_export]
macro_rules! assert_contact {
    ($records:expr, $email:expr, name: $name:expr, phone: $phone:expr) => {{
        let records: &[leads_core::MergedRecord] = &$records;
        let email: &str = $email;
        let expected_name: Option<&str> = $name;
        let expected_phone: Option<&str> = $phone;
        match records
            .iter()
            .find(|m| m.record.email.as_deref() == Some(email))
        {
            Some(m) => {
                if m.record.name.as_deref() != expected_name
                    || m.record.phone.as_deref() != expected_phone
                {
                    panic!(
                        "assert_contact! failed for {:?}:\n  expected name={:?} phone={:?}\n  actual:   {:?}",
                        email, expected_name, expected_phone, m.record
                    );
                }
            }
            None => panic!(
                "assert_contact! failed: no contact with email {:?}.\n  Emails present: {:?}",
                email,
                records.iter().map(|m| m.record.email.clone()).collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a file was skipped for the given reason text.
#[macro_export]
macro_rules! assert_skipped {
    ($summary:expr, $file:expr, $reason:expr) => {{
        let summary: &leads_core::report::RunSummary = &$summary;
        let file: &str = $file;
        let reason: &str = $reason;
        match summary.skipped.iter().find(|s| s.file == file) {
            Some(s) if s.reason.to_string() == reason => {}
            Some(s) => panic!(
                "assert_skipped! failed for {:?}:\n  expected reason: {:?}\n  actual reason:   {:?}",
                file,
                reason,
                s.reason.to_string()
            ),
            None => panic!(
                "assert_skipped! failed: {:?} was not skipped.\n  Skipped: {:?}",
                file,
                summary.skipped.iter().map(|s| &s.file).collect::<Vec<_>>()
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Summary invariants
// ---------------------------------------------------------------------------

/// `unique + duplicates_removed == total_contacts`, and the unique count
/// matches the number of merged records.
pub fn assert_count_invariant(summary: &RunSummary, records: &[MergedRecord]) {
    assert_eq!(
        summary.unique_contacts + summary.duplicates_removed,
        summary.total_contacts,
        "unique ({}) + duplicates removed ({}) must equal valid records ingested ({})",
        summary.unique_contacts,
        summary.duplicates_removed,
        summary.total_contacts
    );
    assert_eq!(
        summary.unique_contacts,
        records.len(),
        "unique count must match the number of merged records"
    );
}

/// No two merged records share an identity key.
pub fn assert_unique_keys(records: &[MergedRecord]) {
    let mut seen = std::collections::HashSet::new();
    for m in records {
        assert!(seen.insert(&m.key), "identity key {} appears twice", m.key);
    }
}
