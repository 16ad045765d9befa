//! Readability scoring using Flesch Reading Ease.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Higher score = easier to read. The score is clamped to `[0, 100]`, and a
//! document with no words or no sentences scores a neutral 50.0.
//!
//! Syllables are estimated per distinct word with a vowel-group heuristic and
//! weighted by the word's frequency.

use std::collections::BTreeMap;

/// Score returned when there is nothing to measure.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Estimate the syllable count of a lowercase word.
///
/// Each run of vowels (`a e i o u y`) counts once. A trailing silent `e` is
/// discounted for words longer than two letters that already have more than
/// one syllable. Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let mut syllables = 0;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.len() > 2 && word.ends_with('e') && syllables > 1 {
        syllables -= 1;
    }

    syllables.max(1)
}

/// Total syllables across a frequency table.
pub fn total_syllables(word_frequency: &BTreeMap<String, usize>) -> usize {
    word_frequency
        .iter()
        .map(|(word, count)| count_syllables(word) * count)
        .sum()
}

/// Compute the Flesch Reading Ease score, clamped to `[0, 100]`.
///
/// # Arguments
///
/// * `word_frequency`: Token counts for the document.
/// * `word_count`: Total number of tokens.
/// * `sentence_count`: Number of sentences.
#[tracing::instrument(skip(word_frequency), fields(distinct = word_frequency.len()))]
pub fn flesch_reading_ease(
    word_frequency: &BTreeMap<String, usize>,
    word_count: usize,
    sentence_count: usize,
) -> f64 {
    if word_count == 0 || sentence_count == 0 {
        return NEUTRAL_SCORE;
    }

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = total_syllables(word_frequency) as f64 / word_count as f64;
    let score = 84.6f64.mul_add(
        -syllables_per_word,
        1.015f64.mul_add(-words_per_sentence, 206.835),
    );

    score.clamp(0.0, 100.0)
}

/// Reading level bands for a Flesch Reading Ease score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingLevel {
    /// 90 and above.
    VeryEasy,
    /// 80 to 90.
    Easy,
    /// 70 to 80.
    FairlyEasy,
    /// 60 to 70.
    Standard,
    /// 50 to 60.
    FairlyDifficult,
    /// 30 to 50.
    Difficult,
    /// Below 30.
    VeryDifficult,
}

impl ReadingLevel {
    /// Band a score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::VeryEasy,
            s if s >= 80.0 => Self::Easy,
            s if s >= 70.0 => Self::FairlyEasy,
            s if s >= 60.0 => Self::Standard,
            s if s >= 50.0 => Self::FairlyDifficult,
            s if s >= 30.0 => Self::Difficult,
            _ => Self::VeryDifficult,
        }
    }

    /// Human-readable label including the approximate school grade.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy (5th grade)",
            Self::Easy => "Easy (6th grade)",
            Self::FairlyEasy => "Fairly Easy (7th grade)",
            Self::Standard => "Standard (8th-9th grade)",
            Self::FairlyDifficult => "Fairly Difficult (10th-12th grade)",
            Self::Difficult => "Difficult (College level)",
            Self::VeryDifficult => "Very Difficult (Graduate level)",
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;

    fn frequency(text: &str) -> (BTreeMap<String, usize>, usize) {
        let tokens = text::tokenize(text);
        let mut freq = BTreeMap::new();
        for t in &tokens {
            *freq.entry(t.clone()).or_insert(0) += 1;
        }
        (freq, tokens.len())
    }

    #[test]
    fn syllables_vowel_groups() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("reading"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("happy"), 2);
    }

    #[test]
    fn syllables_silent_e() {
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("complete"), 2);
    }

    #[test]
    fn syllables_floor_at_one() {
        assert_eq!(count_syllables("nth"), 1);
        assert_eq!(count_syllables(""), 1);
    }

    #[test]
    fn simple_text_scores_easy() {
        let (freq, words) = frequency("The cat sat on the mat. The dog ran fast.");
        let score = flesch_reading_ease(&freq, words, 2);
        assert!(score > 80.0, "score was {score}");
        assert!(score <= 100.0);
    }

    #[test]
    fn dense_text_scores_low() {
        let text = "The implementation of the comprehensive organizational restructuring \
                    initiative necessitated the establishment of interdepartmental \
                    communication protocols that facilitated the dissemination of \
                    procedural documentation.";
        let (freq, words) = frequency(text);
        let score = flesch_reading_ease(&freq, words, 1);
        assert!((0.0..30.0).contains(&score), "score was {score}");
    }

    #[test]
    fn degenerate_inputs_are_neutral() {
        let freq = BTreeMap::new();
        assert_eq!(flesch_reading_ease(&freq, 0, 1), NEUTRAL_SCORE);
        assert_eq!(flesch_reading_ease(&freq, 5, 0), NEUTRAL_SCORE);
    }

    #[test]
    fn score_is_clamped() {
        let (freq, words) = frequency("A. B. C. D.");
        assert_eq!(flesch_reading_ease(&freq, words, 4), 100.0);
    }

    #[test]
    fn reading_level_bands() {
        assert_eq!(ReadingLevel::from_score(95.0), ReadingLevel::VeryEasy);
        assert_eq!(ReadingLevel::from_score(60.0), ReadingLevel::Standard);
        assert_eq!(ReadingLevel::from_score(49.9), ReadingLevel::Difficult);
        assert_eq!(ReadingLevel::from_score(0.0), ReadingLevel::VeryDifficult);
        assert_eq!(
            ReadingLevel::Standard.to_string(),
            "Standard (8th-9th grade)"
        );
    }
}
