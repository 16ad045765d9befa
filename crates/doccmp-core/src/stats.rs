//! Per-document statistics.
//!
//! [`analyze`] runs the whole pipeline for one document in a single pass:
//! normalize, tokenize, split sentences, then aggregate frequencies,
//! readability, and lexical diversity into a [`DocumentStats`].

use std::collections::{BTreeMap, BTreeSet};

use crate::config::AnalysisOptions;
use crate::document::Document;
use crate::error::{AnalysisError, AnalysisResult};
use crate::readability;
use crate::text;

/// Statistics for one analyzed document.
///
/// Built once by [`analyze`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Identifying path or name, set at load time.
    pub filename: String,
    /// Number of tokens.
    pub word_count: usize,
    /// Number of sentence terminators, at least one.
    pub sentence_count: usize,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Raw sentence with the most tokens, including its terminator.
    pub longest_sentence: String,
    /// Token count of [`Self::longest_sentence`].
    pub longest_sentence_word_count: usize,
    /// Distinct tokens.
    pub unique_words: BTreeSet<String>,
    /// Token to occurrence count.
    pub word_frequency: BTreeMap<String, usize>,
    /// Most frequent tokens, highest count first.
    pub top_words: Vec<(String, usize)>,
    /// Flesch Reading Ease in `[0, 100]`.
    pub readability_score: f64,
    /// Distinct tokens as a percentage of all tokens.
    pub lexical_diversity: f64,
    /// One plus the number of blank-line boundaries in the raw text.
    pub paragraph_count: usize,
    /// Token length to occurrence count.
    pub word_length_distribution: BTreeMap<usize, usize>,
    /// Raw sentences in document order.
    pub sentences: Vec<String>,
}

/// Rough sentence complexity derived from the average sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceComplexity {
    /// 15 words per sentence or fewer.
    Low,
    /// More than 15, up to 20.
    Medium,
    /// More than 20.
    High,
}

impl SentenceComplexity {
    /// Human-readable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for SentenceComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DocumentStats {
    /// Number of distinct tokens.
    pub fn unique_word_count(&self) -> usize {
        self.unique_words.len()
    }

    /// How often `word` occurs, matched after lowercasing.
    pub fn frequency_of(&self, word: &str) -> Option<usize> {
        self.word_frequency
            .get(&word.to_ascii_lowercase())
            .copied()
    }

    /// Mean token length weighted by frequency, 0.0 for an empty document.
    pub fn average_word_length(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        let letters: usize = self
            .word_frequency
            .iter()
            .map(|(word, count)| word.len() * count)
            .sum();
        letters as f64 / self.word_count as f64
    }

    /// Complexity band for the average sentence length.
    pub fn sentence_complexity(&self) -> SentenceComplexity {
        if self.avg_sentence_length > 20.0 {
            SentenceComplexity::High
        } else if self.avg_sentence_length > 15.0 {
            SentenceComplexity::Medium
        } else {
            SentenceComplexity::Low
        }
    }
}

/// Tally tokens by exact string equality.
pub fn word_frequency(tokens: &[String]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for token in tokens {
        *frequency.entry(token.clone()).or_insert(0) += 1;
    }
    frequency
}

/// Distinct tokens.
pub fn unique_words(tokens: &[String]) -> BTreeSet<String> {
    tokens.iter().cloned().collect()
}

/// The `n` most frequent words.
///
/// Sorted by count descending; equal counts are ordered by word ascending so
/// the result does not depend on map iteration order.
pub fn top_words(word_frequency: &BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut words: Vec<(String, usize)> = word_frequency
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(n);
    words
}

/// Tally token lengths, duplicates included.
pub fn word_length_distribution(tokens: &[String]) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for token in tokens {
        *distribution.entry(token.len()).or_insert(0) += 1;
    }
    distribution
}

/// Type-token ratio as a percentage, 0.0 when there are no tokens.
pub fn lexical_diversity(unique_count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    unique_count as f64 / word_count as f64 * 100.0
}

/// Words per sentence, 0.0 when there are no sentences.
pub fn avg_sentence_length(word_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    word_count as f64 / sentence_count as f64
}

/// Analyze a loaded document.
///
/// Fails with [`AnalysisError::EmptyDocument`] when the text has no words.
pub fn analyze(document: &Document, options: &AnalysisOptions) -> AnalysisResult<DocumentStats> {
    analyze_text(document.name(), &document.raw, options)
}

/// Analyze raw text under the given name.
///
/// Lines are joined with spaces before tokenizing and sentence splitting;
/// paragraphs are counted on `raw` itself.
#[tracing::instrument(skip(raw, options), fields(text_len = raw.len()))]
pub fn analyze_text(
    name: &str,
    raw: &str,
    options: &AnalysisOptions,
) -> AnalysisResult<DocumentStats> {
    let content = crate::document::join_lines(raw);
    let tokens = text::tokenize(&content);
    if tokens.is_empty() {
        return Err(AnalysisError::EmptyDocument {
            name: name.to_string(),
        });
    }

    let word_count = tokens.len();
    let sentence_count = text::count_sentences(&content);
    let frequency = word_frequency(&tokens);
    let unique = unique_words(&tokens);
    let (longest_sentence, longest_sentence_word_count) = text::longest_sentence(&content);

    let stats = DocumentStats {
        filename: name.to_string(),
        word_count,
        sentence_count,
        avg_sentence_length: avg_sentence_length(word_count, sentence_count),
        longest_sentence,
        longest_sentence_word_count,
        top_words: top_words(&frequency, options.top_word_count),
        readability_score: readability::flesch_reading_ease(&frequency, word_count, sentence_count),
        lexical_diversity: lexical_diversity(unique.len(), word_count),
        paragraph_count: text::count_paragraphs(raw),
        word_length_distribution: word_length_distribution(&tokens),
        sentences: text::split_sentences(&content),
        unique_words: unique,
        word_frequency: frequency,
    };

    tracing::debug!(
        words = stats.word_count,
        sentences = stats.sentence_count,
        unique = stats.unique_word_count(),
        "document analyzed"
    );
    Ok(stats)
}
