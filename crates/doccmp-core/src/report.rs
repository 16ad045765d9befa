//! Plain-text report rendering.
//!
//! Each artifact is a [`Display`](std::fmt::Display) type over the analysis
//! results, so callers decide where the text goes. File names are fixed.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::AnalysisOptions;
use crate::readability::ReadingLevel;
use crate::similarity::Comparison;
use crate::stats::{DocumentStats, top_words};
use crate::text::tokenize;

/// Detailed comparison report.
pub const REPORT_FILE: &str = "result.txt";
/// Report regenerated after a word replacement.
pub const UPDATED_REPORT_FILE: &str = "result_updated.txt";
/// Word cloud for the first document.
pub const WORD_CLOUD_A_FILE: &str = "doc1_wordcloud.txt";
/// Word cloud for the second document.
pub const WORD_CLOUD_B_FILE: &str = "doc2_wordcloud.txt";
/// Side-by-side bar chart.
pub const CHART_FILE: &str = "comparison_chart.txt";

/// Common words listed before the list is elided.
const COMMON_WORDS_SHOWN: usize = 20;
/// Words shown in a word cloud.
const WORD_CLOUD_SIZE: usize = 20;
/// Frequency at which a word cloud entry is uppercased.
const WORD_CLOUD_SHOUT: usize = 5;
/// Most stars drawn after a word cloud entry.
const WORD_CLOUD_MAX_STARS: usize = 10;
/// Words represented by one word-count bar segment.
const WORDS_PER_BAR: usize = 5;
/// Longest word-count bar.
const MAX_WORD_BAR: usize = 50;

/// Format a top-word list as `word(count), word(count)`.
pub fn format_top_words(words: &[(String, usize)]) -> String {
    words
        .iter()
        .map(|(word, count)| format!("{word}({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The `result.txt` report.
#[derive(Debug, Clone, Copy)]
pub struct DetailedReport<'a> {
    comparison: &'a Comparison,
    options: &'a AnalysisOptions,
}

impl<'a> DetailedReport<'a> {
    /// Report over a comparison.
    pub const fn new(comparison: &'a Comparison, options: &'a AnalysisOptions) -> Self {
        Self {
            comparison,
            options,
        }
    }
}

impl fmt::Display for DetailedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.comparison;
        writeln!(f, "TEXT COMPARATOR - DETAILED ANALYSIS REPORT")?;
        writeln!(f, "==========================================\n")?;

        write_heading(f, "DOCUMENT ANALYSIS")?;
        write_document(f, "Document A", &c.a, self.options)?;
        write_document(f, "Document B", &c.b, self.options)?;

        write_heading(f, "COMPARISON ANALYSIS")?;
        write_similarity(f, c)?;
        writeln!(f, "Vocabulary Overlap: {:.1}%\n", c.vocabulary_overlap)?;
        write_common_words(f, &c.common_words)?;
        writeln!(f, "Words exclusive to Document A: {}", c.exclusive_to_a.len())?;
        writeln!(f, "Words exclusive to Document B: {}\n", c.exclusive_to_b.len())?;

        write_heading(f, "LONGEST SENTENCES")?;
        write_longest_sentences(f, c)?;

        writeln!(f, "End of Report")
    }
}

/// The `result_updated.txt` report written after a replacement round.
#[derive(Debug, Clone, Copy)]
pub struct UpdatedReport<'a> {
    comparison: &'a Comparison,
    options: &'a AnalysisOptions,
    old_word: &'a str,
    new_word: &'a str,
}

impl<'a> UpdatedReport<'a> {
    /// Report over the re-analyzed pair.
    pub const fn new(
        comparison: &'a Comparison,
        options: &'a AnalysisOptions,
        old_word: &'a str,
        new_word: &'a str,
    ) -> Self {
        Self {
            comparison,
            options,
            old_word,
            new_word,
        }
    }
}

impl fmt::Display for UpdatedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.comparison;
        writeln!(f, "TEXT COMPARATOR - UPDATED ANALYSIS REPORT")?;
        writeln!(f, "==========================================\n")?;

        writeln!(f, "WORD REPLACEMENT SUMMARY")?;
        writeln!(f, "------------------------")?;
        writeln!(f, "Replaced word: '{}' -> '{}'", self.old_word, self.new_word)?;
        writeln!(
            f,
            "Documents analyzed: {} and {}\n",
            c.a.filename, c.b.filename
        )?;

        write_heading(f, "DOCUMENT ANALYSIS (AFTER REPLACEMENT)")?;
        write_document(f, "Document A", &c.a, self.options)?;
        write_document(f, "Document B", &c.b, self.options)?;

        write_heading(f, "COMPARISON ANALYSIS (AFTER REPLACEMENT)")?;
        write_similarity(f, c)?;
        writeln!(f)?;
        write_common_words(f, &c.common_words)?;

        write_heading(f, "LONGEST SENTENCES (AFTER REPLACEMENT)")?;
        write_longest_sentences(f, c)?;

        write_replacement_counts(f, c, self.new_word)?;

        writeln!(f, "End of Updated Report")
    }
}

/// ASCII word cloud for one document.
#[derive(Debug, Clone, Copy)]
pub struct WordCloud<'a>(pub &'a DocumentStats);

impl fmt::Display for WordCloud<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== WORD CLOUD VISUALIZATION ===\n")?;
        for (word, count) in top_words(&self.0.word_frequency, WORD_CLOUD_SIZE) {
            let shown = if count >= WORD_CLOUD_SHOUT {
                word.to_ascii_uppercase()
            } else {
                word
            };
            let stars = "*".repeat(count.min(WORD_CLOUD_MAX_STARS));
            writeln!(f, "{shown}{stars} ({count})")?;
        }
        Ok(())
    }
}

/// Bar chart comparing word counts and readability.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonChart<'a>(pub &'a Comparison);

impl fmt::Display for ComparisonChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        writeln!(f, "=== VISUAL COMPARISON CHART ===\n")?;

        writeln!(f, "Word Count Comparison:")?;
        for (label, stats) in [("Document A", &c.a), ("Document B", &c.b)] {
            let bar = "\u{2588}".repeat((stats.word_count / WORDS_PER_BAR).min(MAX_WORD_BAR));
            writeln!(f, "{label}: {bar} ({})", stats.word_count)?;
        }
        writeln!(f)?;

        writeln!(f, "Readability Score Comparison:")?;
        for (label, stats) in [("Document A", &c.a), ("Document B", &c.b)] {
            writeln!(
                f,
                "{label}: {} ({:.1})",
                readability_bar(stats.readability_score),
                stats.readability_score
            )?;
        }
        Ok(())
    }
}

/// One `▓` per two readability points.
fn readability_bar(score: f64) -> String {
    let segments = (score.clamp(0.0, 100.0) / 2.0) as usize;
    "\u{2593}".repeat(segments)
}

fn write_heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}\n", "-".repeat(title.len()))
}

fn write_document(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    stats: &DocumentStats,
    options: &AnalysisOptions,
) -> fmt::Result {
    writeln!(f, "{label}: {}", stats.filename)?;
    writeln!(f, "- Word Count: {}", stats.word_count)?;
    writeln!(f, "- Sentence Count: {}", stats.sentence_count)?;
    writeln!(f, "- Unique Words: {}", stats.unique_word_count())?;
    writeln!(
        f,
        "- Average Sentence Length: {:.2} words",
        stats.avg_sentence_length
    )?;
    writeln!(
        f,
        "- Longest Sentence: {} words",
        stats.longest_sentence_word_count
    )?;
    writeln!(
        f,
        "- Top {} Words: {}",
        options.top_word_count,
        format_top_words(&stats.top_words)
    )?;
    if options.include_readability {
        writeln!(
            f,
            "- Readability Score: {:.1} ({})",
            stats.readability_score,
            ReadingLevel::from_score(stats.readability_score)
        )?;
        writeln!(f, "- Lexical Diversity: {:.2}%", stats.lexical_diversity)?;
        writeln!(f, "- Paragraph Count: {}", stats.paragraph_count)?;
        writeln!(
            f,
            "- Average Word Length: {:.2} letters",
            stats.average_word_length()
        )?;
    }
    writeln!(f)
}

fn write_similarity(f: &mut fmt::Formatter<'_>, c: &Comparison) -> fmt::Result {
    writeln!(f, "Jaccard Similarity: {:.2}%", c.similarity)?;
    writeln!(f, "Common Words Count: {}", c.common_words.len())
}

fn write_common_words(f: &mut fmt::Formatter<'_>, words: &BTreeSet<String>) -> fmt::Result {
    let shown: Vec<&str> = words
        .iter()
        .take(COMMON_WORDS_SHOWN)
        .map(String::as_str)
        .collect();
    write!(f, "Common Words: {}", shown.join(", "))?;
    if words.len() > COMMON_WORDS_SHOWN {
        write!(f, "... (and {} more)", words.len() - COMMON_WORDS_SHOWN)?;
    }
    writeln!(f, "\n")
}

/// Counts of the replacement text in both documents.
///
/// The replacement may span several tokens ("big dog"), so each of its
/// tokens is looked up on its own. Nothing is written when none occur.
fn write_replacement_counts(
    f: &mut fmt::Formatter<'_>,
    c: &Comparison,
    new_word: &str,
) -> fmt::Result {
    let mut lines = Vec::new();
    for token in tokenize(new_word) {
        for (label, stats) in [("Document A", &c.a), ("Document B", &c.b)] {
            if let Some(count) = stats.frequency_of(&token) {
                lines.push(format!("'{token}' appears {count} times in {label}"));
            }
        }
    }
    if lines.is_empty() {
        return Ok(());
    }

    writeln!(f, "REPLACEMENT WORD ANALYSIS")?;
    writeln!(f, "-------------------------")?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    writeln!(f)
}

fn write_longest_sentences(f: &mut fmt::Formatter<'_>, c: &Comparison) -> fmt::Result {
    for (label, stats) in [("Document A", &c.a), ("Document B", &c.b)] {
        writeln!(
            f,
            "{label} longest sentence ({} words):",
            stats.longest_sentence_word_count
        )?;
        writeln!(f, "{}\n", stats.longest_sentence.trim())?;
    }
    Ok(())
}
