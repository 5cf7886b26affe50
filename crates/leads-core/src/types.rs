//! Core types for leads-core.
//!
//! This module defines the data structures shared across every stage of the
//! pipeline: the [`Field`] discriminant, the per-row [`CanonicalFields`], the
//! [`NormalizedRecord`] produced by the normalizer, its [`IdentityKey`], and
//! the [`MergedRecord`] held by the merger.

use serde::Serialize;

/// One of the three canonical contact fields every input column maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    /// Resolution priority order. A column matching aliases of several fields
    /// is assigned to the first one in this list.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three canonical values extracted from one input row, before
/// normalization. A field is `None` when the file has no column for it or the
/// cell is missing; it is never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CanonicalFields {
    /// Build from optional raw cell values, treating blank cells as absent.
    pub fn from_cells(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Self {
        fn cell(value: Option<&str>) -> Option<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        }
        Self {
            name: cell(name),
            email: cell(email),
            phone: cell(phone),
        }
    }
}

/// A contact after normalization. Every present value is already in its
/// canonical form: email lowercased, phone digits-only (optionally `+`
/// prefixed), name whitespace-collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NormalizedRecord {
    /// The value used to decide whether two records describe the same
    /// contact: email, else phone, else lowercased name.
    pub fn identity_key(&self) -> Option<IdentityKey> {
        if let Some(email) = &self.email {
            return Some(IdentityKey::Email(email.clone()));
        }
        if let Some(phone) = &self.phone {
            return Some(IdentityKey::Phone(phone.clone()));
        }
        self.name
            .as_ref()
            .map(|name| IdentityKey::Name(name.to_lowercase()))
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Identity key of a contact, tagged with the field it was taken from so that
/// an email and a name that happen to share text never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum IdentityKey {
    Email(String),
    Phone(String),
    Name(String),
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityKey::Email(v) => write!(f, "email:{v}"),
            IdentityKey::Phone(v) => write!(f, "phone:{v}"),
            IdentityKey::Name(v) => write!(f, "name:{v}"),
        }
    }
}

/// One deduplicated contact: the union of every record that shared its
/// identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    /// Key under which this record was first inserted. Never changes.
    pub key: IdentityKey,
    pub record: NormalizedRecord,
    /// Number of input records folded into this one (1 for a contact seen once).
    pub contributions: u32,
}

/// The contents of one input file, handed to the aggregator by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display name used in logs and the run summary (usually the file name).
    pub name: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}
