//! Merger: the run-wide identity key → [`MergedRecord`] map.
//!
//! Records sharing an identity key are folded together. For each field the
//! longer value wins (counted in characters); on a tie the value already held
//! is kept, so the first-ingested record takes precedence. Entries only ever
//! grow more complete; nothing is removed.
//!
//! Iteration order is first-seen key order.

use std::collections::HashMap;

use crate::types::{Field, IdentityKey, MergedRecord, NormalizedRecord};

/// What [`Merger::ingest`] did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First record with this key.
    Inserted,
    /// Folded into an existing record. `updated` lists the fields whose value
    /// changed.
    Merged { updated: Vec<Field> },
    /// The record had no field to derive a key from.
    Rejected,
}

/// Running counters kept alongside the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub unique: usize,
    pub duplicates_removed: usize,
    pub rejected: usize,
}

impl MergeStats {
    /// Records accepted by the merger (`unique + duplicates_removed`).
    pub fn ingested(&self) -> usize {
        self.unique + self.duplicates_removed
    }
}

#[derive(Debug, Default)]
pub struct Merger {
    index: HashMap<IdentityKey, usize>,
    records: Vec<MergedRecord>,
    stats: MergeStats,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, record: NormalizedRecord) -> MergeOutcome {
        let Some(key) = record.identity_key() else {
            self.stats.rejected += 1;
            return MergeOutcome::Rejected;
        };

        match self.index.get(&key) {
            Some(&slot) => {
                let updated = merge_into(&mut self.records[slot], record);
                self.stats.duplicates_removed += 1;
                MergeOutcome::Merged { updated }
            }
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push(MergedRecord {
                    key,
                    record,
                    contributions: 1,
                });
                self.stats.unique += 1;
                MergeOutcome::Inserted
            }
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&MergedRecord> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Merged records in first-seen order.
    pub fn records(&self) -> &[MergedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MergedRecord> {
        self.records
    }
}

fn merge_into(existing: &mut MergedRecord, incoming: NormalizedRecord) -> Vec<Field> {
    existing.contributions += 1;
    let mut updated = Vec::new();
    for field in Field::ALL {
        let Some(candidate) = incoming.get(field) else {
            continue;
        };
        let slot = existing.record.slot_mut(field);
        let replace = match slot.as_deref() {
            None => true,
            Some(current) => current.chars().count() < candidate.chars().count(),
        };
        if replace {
            *slot = Some(candidate.to_string());
            updated.push(field);
        }
    }
    updated
}
