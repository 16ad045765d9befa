//! Error types for doccmp-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or analyzing a document.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The document could not be opened or read.
    #[error("cannot open file '{path}': {source}")]
    Read {
        /// Path that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document exceeds the configured input size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Path of the oversized document.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The document contains no words after normalization.
    #[error("no words found in '{name}'")]
    EmptyDocument {
        /// Name of the document that produced no tokens.
        name: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during word replacement.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplaceError {
    /// The word to find was empty.
    #[error("the word to replace must not be empty")]
    EmptyWord,

    /// The replacement-target menu selection was not one of the offered options.
    #[error("invalid option '{0}': choose 1, 2, or 3")]
    InvalidSelection(String),

    /// The word does not occur as a whole word in the document.
    #[error("word '{word}' not found in {name}")]
    WordNotFound {
        /// The word that was searched for.
        word: String,
        /// Name of the document that was searched.
        name: String,
    },
}

/// Result type alias using [`ReplaceError`].
pub type ReplaceResult<T> = Result<T, ReplaceError>;
