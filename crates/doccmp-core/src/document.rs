//! Document loading.
//!
//! A [`Document`] keeps the raw file contents. The analysis pipeline works on
//! [`Document::joined`], where every line is followed by a single space, while
//! paragraph counting and word replacement use the raw text so that line
//! structure survives.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{AnalysisError, AnalysisResult};

/// A loaded text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path the document was loaded from (or a display name for in-memory text).
    pub path: Utf8PathBuf,
    /// File contents exactly as read.
    pub raw: String,
}

impl Document {
    /// Wrap in-memory text as a document.
    pub fn from_text(path: impl Into<Utf8PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
        }
    }

    /// Display name used in reports.
    pub fn name(&self) -> &str {
        self.path.as_str()
    }

    /// The text the statistics pipeline sees: lines joined with single spaces.
    pub fn joined(&self) -> String {
        join_lines(&self.raw)
    }
}

/// Join lines with single spaces, keeping a trailing space after the last line.
///
/// `"a\nb\n"` becomes `"a b "`. Both `\n` and `\r\n` end a line.
pub fn join_lines(raw: &str) -> String {
    let mut joined = String::with_capacity(raw.len() + 1);
    for line in raw.lines() {
        joined.push_str(line);
        joined.push(' ');
    }
    joined
}

/// Read a document from disk, enforcing an optional size limit.
///
/// The size is checked from metadata before the file is read into memory.
#[tracing::instrument(skip_all, fields(%path, ?max_bytes))]
pub fn load_document(path: &Utf8Path, max_bytes: Option<usize>) -> AnalysisResult<Document> {
    let read_error = |source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_error)?;
    if let Some(limit) = max_bytes {
        let size = metadata.len();
        if size > limit as u64 {
            return Err(AnalysisError::InputTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let raw = std::fs::read_to_string(path.as_std_path()).map_err(read_error)?;
    tracing::info!(%path, bytes = raw.len(), "loaded document");
    Ok(Document {
        path: path.to_path_buf(),
        raw,
    })
}
