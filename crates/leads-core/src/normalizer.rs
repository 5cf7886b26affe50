//! Normalizer: turns raw [`CanonicalFields`] into a [`NormalizedRecord`].
//!
//! Every field is validated independently; an invalid value becomes absent.
//! A record left with no field at all is rejected with [`InvalidRecord`].
//! Normalization is pure and idempotent.

use crate::error::InvalidRecord;
use crate::types::{CanonicalFields, NormalizedRecord};

/// Tunable bounds applied while normalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeRules {
    /// Phones with fewer digits than this are dropped.
    pub min_phone_digits: usize,
    /// Phones with more digits than this are dropped (E.164 allows 15).
    pub max_phone_digits: usize,
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self {
            min_phone_digits: 7,
            max_phone_digits: 15,
        }
    }
}

impl NormalizeRules {
    pub fn normalize(&self, fields: &CanonicalFields) -> Result<NormalizedRecord, InvalidRecord> {
        let record = NormalizedRecord {
            name: fields.name.as_deref().and_then(normalize_name),
            email: fields.email.as_deref().and_then(normalize_email),
            phone: fields
                .phone
                .as_deref()
                .and_then(|p| normalize_phone(p, self)),
        };
        if record.is_empty() {
            return Err(InvalidRecord);
        }
        Ok(record)
    }
}

/// Trim and lowercase; require exactly one `@` with text on both sides.
pub fn normalize_email(value: &str) -> Option<String> {
    let email = value.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(email)
}

/// Keep ASCII digits plus a leading `+`, then check the digit count.
pub fn normalize_phone(value: &str, rules: &NormalizeRules) -> Option<String> {
    let trimmed = value.trim();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));

    let digits = out.len() - usize::from(out.starts_with('+'));
    if digits < rules.min_phone_digits || digits > rules.max_phone_digits {
        return None;
    }
    Some(out)
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_name(value: &str) -> Option<String> {
    let name = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

impl From<&NormalizedRecord> for CanonicalFields {
    fn from(record: &NormalizedRecord) -> Self {
        CanonicalFields {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}
