//! Reads input files into [`SourceFile`] values.
//!
//! Bytes that are not valid UTF-8 are replaced rather than failing the file,
//! and a leading byte-order mark is dropped so it cannot leak into the first
//! header name.

use std::path::{Path, PathBuf};

use leads_core::SourceFile;

use crate::{ContactSource, SourceError};

/// A CSV file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactSource for CsvFile {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load(&self) -> Result<SourceFile, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, std::borrow::Cow::Owned(_)) {
            tracing::warn!(
                file = %self.path.display(),
                "file is not valid UTF-8; invalid bytes replaced"
            );
        }
        let contents = text.strip_prefix('\u{feff}').unwrap_or(&text[..]).to_string();
        Ok(SourceFile::new(self.name(), contents))
    }
}
