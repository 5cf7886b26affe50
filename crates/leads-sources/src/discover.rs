//! Input discovery: list the files in a directory whose names match a simple
//! glob, sorted by file name so every run merges in the same order.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::SourceError;

/// A file-name glob supporting `*` (any run of characters) and `?` (any one
/// character). Matching is case-insensitive, so `*.csv` also finds `LIST.CSV`.
#[derive(Debug, Clone)]
pub struct InputPattern {
    glob: String,
    regex: Regex,
}

impl InputPattern {
    pub fn new(glob: &str) -> Result<Self, SourceError> {
        let regex = Regex::new(&glob_to_regex(glob)).map_err(|source| SourceError::Pattern {
            pattern: glob.to_string(),
            source,
        })?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("(?i)^");
    for ch in glob.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}

/// Regular files directly inside `dir` whose names match `pattern`, sorted by
/// file name. Subdirectories are not descended into.
pub fn discover(dir: &Path, pattern: &InputPattern) -> Result<Vec<PathBuf>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))? {
        let entry = entry.map_err(|e| SourceError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if pattern.matches(&name.to_string_lossy()) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(
        dir = %dir.display(),
        pattern = pattern.as_str(),
        count = files.len(),
        "discovered input files"
    );
    Ok(files)
}
