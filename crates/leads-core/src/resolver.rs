//! Header resolver: maps a file's column names onto the canonical fields.
//!
//! Each column is lowercased, trimmed, and tested for substring containment
//! against the alias list of every field in [`Field::ALL`] order. The first
//! field with a matching alias claims the column. When several columns claim
//! the same field the leftmost wins and the rest are reported as unused.
//!
//! Containment is loose: `"Email Address"` and `"E-Mail"` both
//! resolve to email, but so does `"email_domain"`.

use crate::error::FileError;
use crate::types::{CanonicalFields, Field};

/// Ordered alias substrings for each canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    name: Vec<String>,
    email: Vec<String>,
    phone: Vec<String>,
}

impl AliasTable {
    /// Aliases are lowercased and trimmed; blank entries are dropped.
    pub fn new(name: Vec<String>, email: Vec<String>, phone: Vec<String>) -> Self {
        fn clean(list: Vec<String>) -> Vec<String> {
            list.into_iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect()
        }
        Self {
            name: clean(name),
            email: clean(email),
            phone: clean(phone),
        }
    }

    pub fn aliases(&self, field: Field) -> &[String] {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    /// The field a single column name resolves to, ignoring any other columns.
    pub fn classify(&self, column: &str) -> Option<Field> {
        let column = column.trim().to_lowercase();
        Field::ALL.into_iter().find(|&field| {
            self.aliases(field)
                .iter()
                .any(|alias| column.contains(alias.as_str()))
        })
    }
}

impl Default for AliasTable {
    /// The alias lists from the built-in configuration.
    fn default() -> Self {
        crate::config::Config::defaults().alias_table()
    }
}

/// A source column selected for a canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Zero-based position in the header row.
    pub index: usize,
    /// The header text exactly as it appeared in the file.
    pub header: String,
}

/// A column that matched a field already claimed by an earlier column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedColumn {
    pub column: ColumnRef,
    pub field: Field,
}

/// Result of resolving one file's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    pub name: Option<ColumnRef>,
    pub email: Option<ColumnRef>,
    pub phone: Option<ColumnRef>,
    pub unused: Vec<UnusedColumn>,
}

impl HeaderMapping {
    pub fn column(&self, field: Field) -> Option<&ColumnRef> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Phone => self.phone.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<ColumnRef> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    /// Whether the file can produce identity keys other than names.
    pub fn has_identity_columns(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }

    /// Pull the canonical cells out of one data row. Cells beyond the end of
    /// a short row are absent.
    pub fn extract(&self, row: &csv::StringRecord) -> CanonicalFields {
        let cell = |col: &Option<ColumnRef>| col.as_ref().and_then(|c| row.get(c.index));
        CanonicalFields::from_cells(cell(&self.name), cell(&self.email), cell(&self.phone))
    }
}

/// Resolve `columns` (in file order) against `aliases`.
///
/// Fails with [`FileError::InsufficientColumns`] when neither an email nor a
/// phone column is present.
pub fn resolve<S: AsRef<str>>(
    aliases: &AliasTable,
    columns: &[S],
) -> Result<HeaderMapping, FileError> {
    let mut mapping = HeaderMapping::default();

    for (index, header) in columns.iter().enumerate() {
        let header = header.as_ref();
        let Some(field) = aliases.classify(header) else {
            continue;
        };
        let column = ColumnRef {
            index,
            header: header.to_string(),
        };
        let slot = mapping.slot_mut(field);
        if slot.is_none() {
            *slot = Some(column);
        } else {
            mapping.unused.push(UnusedColumn { column, field });
        }
    }

    if !mapping.has_identity_columns() {
        return Err(FileError::InsufficientColumns {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        });
    }
    Ok(mapping)
}
