//! Core library for doccmp.
//!
//! This crate holds the text analysis and comparison engine used by the
//! `doccmp` CLI. Everything here is synchronous and free of terminal I/O;
//! the CLI decides what to print and where files go.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and analysis options
//! - [`document`] - Loading documents from disk
//! - [`text`] - Normalization, tokenization, and sentence splitting
//! - [`readability`] - Flesch Reading Ease and syllable estimates
//! - [`stats`] - Per-document statistics
//! - [`similarity`] - Jaccard similarity and vocabulary comparison
//! - [`replace`] - Case-insensitive whole-word replacement
//! - [`report`] - Plain-text reports and visualizations
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use doccmp_core::{AnalysisOptions, analyze_text, compare};
//!
//! let options = AnalysisOptions::default();
//! let a = analyze_text("a", "The cat sat. The dog ran fast!", &options).unwrap();
//! let b = analyze_text("b", "The cat slept. A dog ran.", &options).unwrap();
//!
//! let comparison = compare(a, b);
//! assert_eq!(comparison.common_words.len(), 4);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod document;
pub mod error;
pub mod readability;
pub mod replace;
pub mod report;
pub mod similarity;
pub mod stats;
pub mod text;

/// Default maximum input file size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use config::{AnalysisOptions, Config, ConfigLoader, LogLevel};
pub use document::{Document, load_document};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, ReplaceError, ReplaceResult,
};
pub use replace::{ReplacementTarget, replace_word_in_text};
pub use similarity::{Comparison, compare};
pub use stats::{DocumentStats, analyze, analyze_text};
