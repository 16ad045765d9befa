//! Terminal rendering of comparison results.
//!
//! Everything writes to a caller-supplied [`Write`] so the same tables can be
//! printed to stdout or captured in tests. Headings are colored only when
//! stdout supports it (or `--color always` is given).

use std::io::{self, Write};

use camino::Utf8PathBuf;
use doccmp_core::config::AnalysisOptions;
use doccmp_core::readability::ReadingLevel;
use doccmp_core::similarity::{Comparison, Leader};
use doccmp_core::stats::DocumentStats;
use owo_colors::{OwoColorize, Stream};

/// Rows shown in the common-words table.
const COMMON_WORD_ROWS: usize = 15;
/// Longest filename shown in the comparison table.
const FILENAME_WIDTH: usize = 22;

fn heading(out: &mut impl Write, title: &str, rule: char, width: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        title.if_supports_color(Stream::Stdout, |t| t.bold())
    )?;
    rule_line(out, rule, width)
}

fn rule_line(out: &mut impl Write, rule: char, width: usize) -> io::Result<()> {
    writeln!(out, "{}", rule.to_string().repeat(width))
}

fn short_name(name: &str) -> String {
    name.chars().take(FILENAME_WIDTH).collect()
}

/// Print the full comparison to stdout.
pub fn print_comparison(comparison: &Comparison, options: &AnalysisOptions) -> io::Result<()> {
    write_comparison(&mut io::stdout().lock(), comparison, options)
}

/// Write the comparison table, similarity, top words, and common words.
///
/// The advanced table and insights follow when readability is enabled.
pub fn write_comparison(
    out: &mut impl Write,
    comparison: &Comparison,
    options: &AnalysisOptions,
) -> io::Result<()> {
    write_metrics_table(out, comparison)?;
    write_similarity(out, comparison)?;
    write_top_words(out, &comparison.a, &comparison.b, options.top_word_count)?;
    write_common_words(out, comparison)?;
    if options.include_readability {
        write_advanced_analysis(out, &comparison.a, &comparison.b)?;
        write_insights(out, comparison)?;
    }
    Ok(())
}

fn write_metrics_table(out: &mut impl Write, c: &Comparison) -> io::Result<()> {
    heading(out, "COMPARISON RESULTS", '-', 75)?;
    writeln!(out, "{:<25}{:<25}{:<25}", "Metric", "Document A", "Document B")?;
    rule_line(out, '-', 75)?;

    let (a, b) = (&c.a, &c.b);
    writeln!(
        out,
        "{:<25}{:<25}{:<25}",
        "Filename:",
        short_name(&a.filename),
        short_name(&b.filename)
    )?;
    writeln!(out, "{:<25}{:<25}{:<25}", "Word Count:", a.word_count, b.word_count)?;
    writeln!(
        out,
        "{:<25}{:<25}{:<25}",
        "Sentence Count:", a.sentence_count, b.sentence_count
    )?;
    writeln!(
        out,
        "{:<25}{:<25}{:<25}",
        "Unique Words:",
        a.unique_word_count(),
        b.unique_word_count()
    )?;
    writeln!(
        out,
        "{:<25}{:<25.2}{:<25.2}",
        "Avg Sentence Length:", a.avg_sentence_length, b.avg_sentence_length
    )?;
    writeln!(
        out,
        "{:<25}{:<25}{:<25}",
        "Longest Sentence:",
        format!("{} words", a.longest_sentence_word_count),
        format!("{} words", b.longest_sentence_word_count)
    )?;
    rule_line(out, '-', 75)
}

fn write_similarity(out: &mut impl Write, c: &Comparison) -> io::Result<()> {
    heading(out, "SIMILARITY ANALYSIS", '-', 30)?;
    writeln!(out, "Jaccard Similarity: {:.2}%", c.similarity)?;
    writeln!(out, "Common Words: {}", c.common_words.len())
}

fn write_top_words(
    out: &mut impl Write,
    a: &DocumentStats,
    b: &DocumentStats,
    count: usize,
) -> io::Result<()> {
    heading(out, &format!("TOP {count} FREQUENT WORDS"), '-', 30)?;
    writeln!(out, "{:<15}{:<15}", "Document A", "Document B")?;
    rule_line(out, '-', 30)?;

    let cell = |stats: &DocumentStats, i: usize| {
        stats
            .top_words
            .get(i)
            .map_or_else(|| "-".to_string(), |(word, n)| format!("{word}({n})"))
    };
    for i in 0..count {
        writeln!(out, "{:<15}{:<15}", cell(a, i), cell(b, i))?;
    }
    Ok(())
}

fn write_common_words(out: &mut impl Write, c: &Comparison) -> io::Result<()> {
    heading(out, "COMMON WORDS DETAILED ANALYSIS", '=', 70)?;

    let Some(most_shared) = c.common_word_counts.first() else {
        return writeln!(out, "No common words found between the documents.");
    };

    writeln!(
        out,
        "{:<15}{:<12}{:<12}{:<15}{:<15}",
        "Word", "Doc A Count", "Doc B Count", "Total Uses", "Frequency %"
    )?;
    rule_line(out, '-', 70)?;

    for common in c.common_word_counts.iter().take(COMMON_WORD_ROWS) {
        let freq_a = common.count_a as f64 / c.a.word_count as f64 * 100.0;
        let freq_b = common.count_b as f64 / c.b.word_count as f64 * 100.0;
        writeln!(
            out,
            "{:<15}{:<12}{:<12}{:<15}{:<15}",
            common.word,
            common.count_a,
            common.count_b,
            common.total(),
            format!("{:.1}%", (freq_a + freq_b) / 2.0)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Common Words Statistics:")?;
    writeln!(out, "  Total common words: {}", c.common_words.len())?;
    writeln!(
        out,
        "  Most shared word: '{}' (used {} times total)",
        most_shared.word,
        most_shared.total()
    )?;
    writeln!(out, "  Vocabulary overlap: {:.1}%", c.vocabulary_overlap)
}

fn write_advanced_analysis(
    out: &mut impl Write,
    a: &DocumentStats,
    b: &DocumentStats,
) -> io::Result<()> {
    heading(out, "ADVANCED LINGUISTIC ANALYSIS", '=', 80)?;
    writeln!(out, "{:<35}{:<22}{:<23}", "Metric", "Document A", "Document B")?;
    rule_line(out, '-', 80)?;

    let row = |out: &mut dyn Write, label: &str, x: String, y: String| {
        writeln!(out, "{label:<35}{x:<22}{y:<23}")
    };
    row(
        out,
        "Readability Score:",
        format!("{:.0}/100", a.readability_score.trunc()),
        format!("{:.0}/100", b.readability_score.trunc()),
    )?;
    row(
        out,
        "Reading Level:",
        ReadingLevel::from_score(a.readability_score).to_string(),
        ReadingLevel::from_score(b.readability_score).to_string(),
    )?;
    row(
        out,
        "Lexical Diversity (TTR):",
        format!("{:.1}%", a.lexical_diversity),
        format!("{:.1}%", b.lexical_diversity),
    )?;
    row(
        out,
        "Paragraph Count:",
        a.paragraph_count.to_string(),
        b.paragraph_count.to_string(),
    )?;
    row(
        out,
        "Average Word Length:",
        format!("{:.2} letters", a.average_word_length()),
        format!("{:.2} letters", b.average_word_length()),
    )?;
    row(
        out,
        "Sentence Complexity:",
        a.sentence_complexity().to_string(),
        b.sentence_complexity().to_string(),
    )?;
    rule_line(out, '-', 80)
}

fn write_insights(out: &mut impl Write, c: &Comparison) -> io::Result<()> {
    let insights = c.insights();
    heading(out, "DOCUMENT INSIGHTS", '-', 40)?;

    let line = |leader: Leader, quality: &str, neither: &str| match leader {
        Leader::A => format!("Document A {quality}"),
        Leader::B => format!("Document B {quality}"),
        Leader::Neither => neither.to_string(),
    };
    writeln!(
        out,
        "{}",
        line(
            insights.easier_to_read,
            "is significantly easier to read",
            "Both documents have similar reading difficulty",
        )
    )?;
    writeln!(
        out,
        "{}",
        line(
            insights.richer_vocabulary,
            "has richer vocabulary diversity",
            "Both documents have similar vocabulary richness",
        )
    )?;
    writeln!(
        out,
        "{}",
        line(
            insights.more_complex_sentences,
            "uses more complex sentence structures",
            "Both documents have similar sentence complexity",
        )
    )
}

/// Print the list of files written by a run.
pub fn print_generated_files(files: &[Utf8PathBuf]) -> io::Result<()> {
    write_generated_files(&mut io::stdout().lock(), files)
}

/// Write the list of files written by a run.
pub fn write_generated_files(out: &mut impl Write, files: &[Utf8PathBuf]) -> io::Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    heading(out, "FILES GENERATED", '-', 40)?;
    for file in files {
        writeln!(
            out,
            "  {}",
            file.if_supports_color(Stream::Stdout, |t| t.cyan())
        )?;
    }
    Ok(())
}

/// Print the summary shown after a replacement round.
pub fn print_updated_summary(comparison: &Comparison, old: &str, new: &str) -> io::Result<()> {
    write_updated_summary(&mut io::stdout().lock(), comparison, old, new)
}

/// Write the summary shown after a replacement round.
pub fn write_updated_summary(
    out: &mut impl Write,
    c: &Comparison,
    old: &str,
    new: &str,
) -> io::Result<()> {
    heading(out, "UPDATED COMPARISON SUMMARY", '-', 40)?;
    writeln!(out, "Replaced '{old}' with '{new}'")?;
    writeln!(out, "Document A: {} ({} words)", c.a.filename, c.a.word_count)?;
    writeln!(out, "Document B: {} ({} words)", c.b.filename, c.b.word_count)?;
    writeln!(out, "Jaccard Similarity: {:.2}%", c.similarity)?;
    writeln!(out, "Common Words: {}", c.common_words.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doccmp_core::{analyze_text, compare};

    fn comparison() -> Comparison {
        let options = AnalysisOptions::default();
        compare(
            analyze_text("a.txt", "The cat sat. The dog ran fast!", &options).unwrap(),
            analyze_text("b.txt", "The cat slept. A dog ran.", &options).unwrap(),
        )
    }

    fn render(options: &AnalysisOptions) -> String {
        let mut buf = Vec::new();
        write_comparison(&mut buf, &comparison(), options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn comparison_sections() {
        let text = render(&AnalysisOptions::default());
        assert!(text.contains("Jaccard Similarity: 50.00%"));
        assert!(text.contains("Common Words: 4"));
        assert!(text.contains("the(2)"));
        assert!(text.contains("Most shared word: 'the' (used 3 times total)"));
        assert!(text.contains("Vocabulary overlap: 66.7%"));
        assert!(text.contains("ADVANCED LINGUISTIC ANALYSIS"));
        assert!(text.contains("DOCUMENT INSIGHTS"));
    }

    #[test]
    fn basic_mode_skips_advanced_sections() {
        let options = AnalysisOptions {
            include_readability: false,
            ..AnalysisOptions::default()
        };
        let text = render(&options);
        assert!(!text.contains("ADVANCED LINGUISTIC ANALYSIS"));
        assert!(!text.contains("DOCUMENT INSIGHTS"));
    }

    #[test]
    fn top_word_rows_pad_with_dash() {
        let options = AnalysisOptions {
            top_word_count: 8,
            ..AnalysisOptions::default()
        };
        let text = render(&options);
        assert!(text.contains("TOP 8 FREQUENT WORDS"));
        // Both documents have six distinct words, so the last rows are padded.
        assert!(text.contains(&format!("{:<15}{:<15}\n", "-", "-")));
    }

    #[test]
    fn updated_summary_lists_documents() {
        let mut buf = Vec::new();
        write_updated_summary(&mut buf, &comparison(), "dog", "wolf").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Replaced 'dog' with 'wolf'"));
        assert!(text.contains("Document A: a.txt (7 words)"));
    }

    #[test]
    fn no_generated_files_prints_nothing() {
        let mut buf = Vec::new();
        write_generated_files(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
