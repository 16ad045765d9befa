//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Compare Command
// =============================================================================

const DOC_A: &str = "The cat sat.\nThe dog ran fast!\n";
const DOC_B: &str = "The cat slept. A dog ran.\n";

/// A temp directory holding the two sample documents.
fn sample_docs() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("a.txt"), DOC_A).unwrap();
    std::fs::write(tmp.path().join("b.txt"), DOC_B).unwrap();
    tmp
}

fn in_dir(tmp: &tempfile::TempDir) -> Command {
    let mut command = cmd();
    command.args(["-C", tmp.path().to_str().unwrap()]);
    command
}

#[test]
fn compare_prints_similarity_and_writes_reports() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["compare", "a.txt", "b.txt", "--no-replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jaccard Similarity: 50.00%"))
        .stdout(predicate::str::contains("Common Words: 4"))
        .stdout(predicate::str::contains("DOCUMENT INSIGHTS"));

    let report = std::fs::read_to_string(tmp.path().join("result.txt")).unwrap();
    assert!(report.contains("TEXT COMPARATOR - DETAILED ANALYSIS REPORT"));
    assert!(report.contains("Document A: a.txt"));
    assert!(report.contains("Common Words: cat, dog, ran, the"));
    for name in ["doc1_wordcloud.txt", "doc2_wordcloud.txt", "comparison_chart.txt"] {
        assert!(tmp.path().join(name).exists(), "{name} should be written");
    }
}

#[test]
fn compare_basic_skips_readability() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["compare", "a.txt", "b.txt", "--no-replace", "--basic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ADVANCED LINGUISTIC ANALYSIS").not());

    let report = std::fs::read_to_string(tmp.path().join("result.txt")).unwrap();
    assert!(!report.contains("Readability Score"));
}

#[test]
fn compare_without_visualization_writes_report_only() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["compare", "a.txt", "b.txt", "--no-replace", "--no-visualization"])
        .assert()
        .success();

    assert!(tmp.path().join("result.txt").exists());
    assert!(!tmp.path().join("comparison_chart.txt").exists());
    assert!(!tmp.path().join("doc1_wordcloud.txt").exists());
}

#[test]
fn compare_top_and_output_dir() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args([
            "compare",
            "a.txt",
            "b.txt",
            "--no-replace",
            "--top",
            "2",
            "--output-dir",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOP 2 FREQUENT WORDS"));

    let report = std::fs::read_to_string(tmp.path().join("out").join("result.txt")).unwrap();
    assert!(report.contains("- Top 2 Words: the(2), cat(1)"));
    assert!(!tmp.path().join("result.txt").exists());
}

#[test]
fn compare_missing_file_fails() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["compare", "a.txt", "missing.txt", "--no-replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open file 'missing.txt'"));

    assert!(!tmp.path().join("result.txt").exists());
}

#[test]
fn compare_empty_document_fails() {
    let tmp = sample_docs();
    std::fs::write(tmp.path().join("empty.txt"), "123 ... 456\n").unwrap();
    in_dir(&tmp)
        .args(["compare", "a.txt", "empty.txt", "--no-replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no words found"));
}

#[test]
fn compare_respects_config_file() {
    let tmp = sample_docs();
    std::fs::write(
        tmp.path().join(".doccmp.toml"),
        "include_visualization = false\ntop_word_count = 3\n",
    )
    .unwrap();
    in_dir(&tmp)
        .args(["compare", "a.txt", "b.txt", "--no-replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOP 3 FREQUENT WORDS"));

    assert!(!tmp.path().join("comparison_chart.txt").exists());
}

#[test]
fn compare_without_paths_needs_a_terminal() {
    let tmp = sample_docs();
    in_dir(&tmp).arg("compare").assert().failure();
}

// =============================================================================
// Replace Command
// =============================================================================

#[test]
fn replace_updates_both_documents() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["replace", "a.txt", "b.txt", "--word", "DOG", "--with", "wolf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 occurrence(s) of 'DOG'"))
        .stdout(predicate::str::contains("UPDATED COMPARISON SUMMARY"));

    let updated = std::fs::read_to_string(tmp.path().join("a_updated.txt")).unwrap();
    assert_eq!(updated, "The cat sat.\nThe wolf ran fast!\n");
    assert!(tmp.path().join("b_updated.txt").exists());

    let report = std::fs::read_to_string(tmp.path().join("result_updated.txt")).unwrap();
    assert!(report.contains("Replaced word: 'DOG' -> 'wolf'"));
    assert!(report.contains("'wolf' appears 1 times in Document A"));
    assert!(report.contains("'wolf' appears 1 times in Document B"));
}

#[test]
fn replace_first_only_leaves_second_alone() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args([
            "replace", "a.txt", "b.txt", "--word", "cat", "--with", "lynx", "--target", "first",
        ])
        .assert()
        .success();

    assert!(tmp.path().join("a_updated.txt").exists());
    assert!(!tmp.path().join("b_updated.txt").exists());
    let report = std::fs::read_to_string(tmp.path().join("result_updated.txt")).unwrap();
    assert!(report.contains("Documents analyzed: a_updated.txt and b.txt"));
}

#[test]
fn replace_word_not_found_writes_nothing() {
    let tmp = sample_docs();
    in_dir(&tmp)
        .args(["replace", "a.txt", "b.txt", "--word", "giraffe", "--with", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("word 'giraffe' not found in a.txt"))
        .stdout(predicate::str::contains("No files were updated."));

    assert!(!tmp.path().join("result_updated.txt").exists());
}

#[test]
fn replace_whole_words_only() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("a.txt"), "concatenate cats cat.").unwrap();
    std::fs::write(tmp.path().join("b.txt"), "A cat.").unwrap();
    in_dir(&tmp)
        .args([
            "replace", "a.txt", "b.txt", "--word", "cat", "--with", "dog", "--target", "first",
        ])
        .assert()
        .success();

    let updated = std::fs::read_to_string(tmp.path().join("a_updated.txt")).unwrap();
    assert_eq!(updated, "concatenate cats dog.");
}

#[test]
fn replace_invalid_target_fails() {
    cmd()
        .args(["replace", "a.txt", "b.txt", "--word", "x", "--with", "y", "--target", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
