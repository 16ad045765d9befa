//! Case-insensitive whole-word replacement.
//!
//! Matching runs over an ASCII-lowercased view of the text, which has the same
//! byte offsets as the original. All accepted spans are located first; the
//! output is then assembled from the untouched spans of the original text and
//! the replacement word, so inserted text is never searched again.

use std::ops::Range;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{ReplaceError, ReplaceResult};

/// Suffix inserted before the extension of an updated document.
pub const UPDATED_SUFFIX: &str = "_updated";

/// Byte ranges of every whole-word, case-insensitive occurrence of `word`.
///
/// Occurrences are found left to right without overlap. One is accepted only
/// when the bytes immediately before and after it (if any) are not ASCII
/// alphanumeric; a rejected occurrence is skipped over entirely.
pub fn find_word_matches(text: &str, word: &str) -> ReplaceResult<Vec<Range<usize>>> {
    if word.is_empty() {
        return Err(ReplaceError::EmptyWord);
    }

    let haystack = text.to_ascii_lowercase();
    let needle = word.to_ascii_lowercase();
    let bytes = haystack.as_bytes();

    let matches = haystack
        .match_indices(&needle)
        .map(|(start, found)| start..start + found.len())
        .filter(|span| {
            let before_ok = span.start == 0 || !bytes[span.start - 1].is_ascii_alphanumeric();
            let after_ok = bytes
                .get(span.end)
                .is_none_or(|b| !b.is_ascii_alphanumeric());
            before_ok && after_ok
        })
        .collect();

    Ok(matches)
}

/// Count whole-word occurrences of `word` in `text`.
pub fn count_word_occurrences(text: &str, word: &str) -> ReplaceResult<usize> {
    Ok(find_word_matches(text, word)?.len())
}

/// Result of a replacement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Text with every accepted occurrence replaced.
    pub text: String,
    /// Number of occurrences replaced.
    pub count: usize,
}

/// Replace every whole-word occurrence of `old` with `new`.
///
/// `new` is inserted exactly as given; the case of the surrounding text is
/// preserved.
pub fn replace_word_in_text(text: &str, old: &str, new: &str) -> ReplaceResult<Replacement> {
    let spans = find_word_matches(text, old)?;

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in &spans {
        output.push_str(&text[cursor..span.start]);
        output.push_str(new);
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);

    Ok(Replacement {
        text: output,
        count: spans.len(),
    })
}

/// Path for the updated copy of a document.
///
/// `notes.txt` becomes `notes_updated.txt`; a path without an extension gets
/// `_updated.txt` appended.
pub fn updated_path(path: &Utf8Path) -> Utf8PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path.with_file_name(format!("{stem}{UPDATED_SUFFIX}.{ext}")),
        _ => Utf8PathBuf::from(format!("{path}{UPDATED_SUFFIX}.txt")),
    }
}

/// Which documents a replacement round applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ReplacementTarget {
    /// Both documents.
    Both,
    /// Only the first document.
    First,
    /// Only the second document.
    Second,
}

impl ReplacementTarget {
    /// Parse the numbered menu choice (`1` both, `2` first, `3` second).
    pub fn from_menu_option(choice: &str) -> ReplaceResult<Self> {
        match choice.trim() {
            "1" => Ok(Self::Both),
            "2" => Ok(Self::First),
            "3" => Ok(Self::Second),
            other => Err(ReplaceError::InvalidSelection(other.to_string())),
        }
    }

    /// Whether the first document is targeted.
    pub const fn includes_first(self) -> bool {
        matches!(self, Self::Both | Self::First)
    }

    /// Whether the second document is targeted.
    pub const fn includes_second(self) -> bool {
        matches!(self, Self::Both | Self::Second)
    }

    /// The documents to feed the updated report.
    ///
    /// Each side uses its updated copy when one was written and the original
    /// otherwise. Returns `None` when nothing was updated.
    pub fn report_pair<'a>(
        self,
        originals: (&'a Utf8Path, &'a Utf8Path),
        updated_first: Option<&'a Utf8Path>,
        updated_second: Option<&'a Utf8Path>,
    ) -> Option<(&'a Utf8Path, &'a Utf8Path)> {
        let first = updated_first.filter(|_| self.includes_first());
        let second = updated_second.filter(|_| self.includes_second());
        if first.is_none() && second.is_none() {
            return None;
        }
        Some((first.unwrap_or(originals.0), second.unwrap_or(originals.1)))
    }
}

impl std::fmt::Display for ReplacementTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Both => "both",
            Self::First => "first",
            Self::Second => "second",
        })
    }
}
