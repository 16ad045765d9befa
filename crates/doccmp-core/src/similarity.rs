//! Vocabulary comparison between two documents.
//!
//! Set-based measures over each document's distinct words, plus the
//! combined [`Comparison`] that report renderers consume.

use std::collections::{BTreeMap, BTreeSet};

use crate::stats::DocumentStats;

/// Readability scores closer than this are considered similar.
const READABILITY_MARGIN: f64 = 5.0;
/// Lexical diversity percentages closer than this are considered similar.
const DIVERSITY_MARGIN: f64 = 5.0;
/// Average sentence lengths closer than this are considered similar.
const SENTENCE_LENGTH_MARGIN: f64 = 3.0;

/// Jaccard similarity as a percentage: `|a ∩ b| / |a ∪ b| × 100`.
///
/// Two empty sets have similarity 0.0.
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64 * 100.0
}

/// Words present in both sets.
pub fn find_common_words(a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
    a.intersection(b).cloned().collect()
}

/// Words in `a` that are not in `b`.
pub fn find_exclusive_words(a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
    a.difference(b).cloned().collect()
}

/// A word used by both documents, with its count in each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonWord {
    /// The shared word.
    pub word: String,
    /// Occurrences in the first document.
    pub count_a: usize,
    /// Occurrences in the second document.
    pub count_b: usize,
}

impl CommonWord {
    /// Combined occurrences across both documents.
    pub const fn total(&self) -> usize {
        self.count_a + self.count_b
    }
}

/// Every word present in both frequency tables, with both counts.
///
/// Sorted by combined count descending, then by word ascending.
pub fn common_words_with_counts(
    a: &BTreeMap<String, usize>,
    b: &BTreeMap<String, usize>,
) -> Vec<CommonWord> {
    let mut common: Vec<CommonWord> = a
        .iter()
        .filter_map(|(word, &count_a)| {
            b.get(word).map(|&count_b| CommonWord {
                word: word.clone(),
                count_a,
                count_b,
            })
        })
        .collect();
    common.sort_by(|x, y| y.total().cmp(&x.total()).then_with(|| x.word.cmp(&y.word)));
    common
}

/// Shared words as a percentage of the larger vocabulary.
///
/// Returns 0.0 when both vocabularies are empty.
pub fn vocabulary_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64 * 100.0
}

/// Which of the two documents a comparison favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    /// The first document.
    A,
    /// The second document.
    B,
    /// Neither, within the margin.
    Neither,
}

impl Leader {
    fn by_margin(a: f64, b: f64, margin: f64) -> Self {
        if a > b + margin {
            Self::A
        } else if b > a + margin {
            Self::B
        } else {
            Self::Neither
        }
    }
}

/// Qualitative differences between two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insights {
    /// Which document is easier to read.
    pub easier_to_read: Leader,
    /// Which document has the richer vocabulary.
    pub richer_vocabulary: Leader,
    /// Which document uses longer sentences.
    pub more_complex_sentences: Leader,
}

impl Insights {
    /// Compare readability, diversity, and sentence length.
    pub fn between(a: &DocumentStats, b: &DocumentStats) -> Self {
        Self {
            easier_to_read: Leader::by_margin(
                a.readability_score,
                b.readability_score,
                READABILITY_MARGIN,
            ),
            richer_vocabulary: Leader::by_margin(
                a.lexical_diversity,
                b.lexical_diversity,
                DIVERSITY_MARGIN,
            ),
            more_complex_sentences: Leader::by_margin(
                a.avg_sentence_length,
                b.avg_sentence_length,
                SENTENCE_LENGTH_MARGIN,
            ),
        }
    }
}

/// Everything the reports need about a pair of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// First document ("Document A").
    pub a: DocumentStats,
    /// Second document ("Document B").
    pub b: DocumentStats,
    /// Jaccard similarity of the vocabularies, as a percentage.
    pub similarity: f64,
    /// Words used by both documents.
    pub common_words: BTreeSet<String>,
    /// Words used only by the first document.
    pub exclusive_to_a: BTreeSet<String>,
    /// Words used only by the second document.
    pub exclusive_to_b: BTreeSet<String>,
    /// Shared words with per-document counts, most used first.
    pub common_word_counts: Vec<CommonWord>,
    /// Shared words relative to the larger vocabulary, as a percentage.
    pub vocabulary_overlap: f64,
}

impl Comparison {
    /// Qualitative insights for this pair.
    pub fn insights(&self) -> Insights {
        Insights::between(&self.a, &self.b)
    }
}

/// Compare two analyzed documents.
#[tracing::instrument(skip_all, fields(a = %a.filename, b = %b.filename))]
pub fn compare(a: DocumentStats, b: DocumentStats) -> Comparison {
    let similarity = jaccard_similarity(&a.unique_words, &b.unique_words);
    let common_words = find_common_words(&a.unique_words, &b.unique_words);
    let exclusive_to_a = find_exclusive_words(&a.unique_words, &b.unique_words);
    let exclusive_to_b = find_exclusive_words(&b.unique_words, &a.unique_words);
    let common_word_counts = common_words_with_counts(&a.word_frequency, &b.word_frequency);
    let vocabulary_overlap = vocabulary_overlap(&a.unique_words, &b.unique_words);

    tracing::debug!(similarity, common = common_words.len(), "documents compared");

    Comparison {
        a,
        b,
        similarity,
        common_words,
        exclusive_to_a,
        exclusive_to_b,
        common_word_counts,
        vocabulary_overlap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisOptions;
    use crate::stats::analyze_text;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn stats(raw: &str) -> DocumentStats {
        analyze_text("t", raw, &AnalysisOptions::default()).unwrap()
    }

    #[test]
    fn jaccard_identical_sets() {
        let s = set(&["a", "b", "c"]);
        assert!((jaccard_similarity(&s, &s) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_empty_sets() {
        let empty = BTreeSet::new();
        assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn jaccard_partial_overlap() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["b", "c", "d"]);
        assert!((jaccard_similarity(&a, &b) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn common_words_symmetric() {
        let a = set(&["the", "cat", "sat"]);
        let b = set(&["the", "dog", "cat"]);
        assert_eq!(find_common_words(&a, &b), find_common_words(&b, &a));
        assert_eq!(find_common_words(&a, &b), set(&["cat", "the"]));
    }

    #[test]
    fn exclusive_words_disjoint() {
        let a = set(&["the", "cat", "sat"]);
        let b = set(&["the", "dog", "cat"]);
        let only_a = find_exclusive_words(&a, &b);
        let only_b = find_exclusive_words(&b, &a);
        assert_eq!(only_a, set(&["sat"]));
        assert_eq!(only_b, set(&["dog"]));
        assert!(only_a.is_disjoint(&only_b));
    }

    #[test]
    fn common_counts_sorted_by_total() {
        let a = stats("the the the cat dog");
        let b = stats("dog dog the cat");
        let common = common_words_with_counts(&a.word_frequency, &b.word_frequency);
        let order: Vec<&str> = common.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(order, vec!["the", "dog", "cat"]);
        assert_eq!(common[0].count_a, 3);
        assert_eq!(common[0].count_b, 1);
        assert_eq!(common[0].total(), 4);
    }

    #[test]
    fn overlap_uses_larger_vocabulary() {
        let a = set(&["a", "b"]);
        let b = set(&["a", "c", "d", "e"]);
        assert!((vocabulary_overlap(&a, &b) - 25.0).abs() < 1e-9);
        assert_eq!(vocabulary_overlap(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }

    #[test]
    fn scenario_two_documents() {
        let comparison = compare(
            stats("The cat sat. The dog ran fast!"),
            stats("The cat slept. A dog ran."),
        );
        assert!(comparison.similarity > 0.0);
        assert_eq!(comparison.common_words, set(&["cat", "dog", "ran", "the"]));
        assert_eq!(comparison.exclusive_to_a, set(&["fast", "sat"]));
        assert_eq!(comparison.exclusive_to_b, set(&["a", "slept"]));
        // 4 shared out of 8 distinct words
        assert!((comparison.similarity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn insights_respect_margins() {
        let mut a = stats("The cat sat.");
        let mut b = a.clone();
        assert_eq!(Insights::between(&a, &b).easier_to_read, Leader::Neither);

        a.readability_score = 90.0;
        b.readability_score = 60.0;
        b.avg_sentence_length = a.avg_sentence_length + 4.0;
        let insights = Insights::between(&a, &b);
        assert_eq!(insights.easier_to_read, Leader::A);
        assert_eq!(insights.more_complex_sentences, Leader::B);
        assert_eq!(insights.richer_vocabulary, Leader::Neither);
    }
}
