//! Word replacement: one round from the command line, or repeated rounds
//! driven by prompts after `compare`.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use dialoguer::{Confirm, Input};
use doccmp_core::config::Config;
use doccmp_core::error::ReplaceError;
use doccmp_core::replace::{ReplacementTarget, replace_word_in_text, updated_path};
use doccmp_core::report::{UPDATED_REPORT_FILE, UpdatedReport};
use doccmp_core::similarity::Comparison;
use doccmp_core::load_document;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, info, instrument, warn};

use super::{RunContext, analyze_pair, report_error, write_output};
use crate::console;

/// Arguments for the `replace` subcommand.
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// First document.
    pub file_a: Utf8PathBuf,

    /// Second document.
    pub file_b: Utf8PathBuf,

    /// Word to replace (whole words, any case).
    #[arg(long, value_name = "OLD")]
    pub word: String,

    /// Replacement text, inserted exactly as given.
    #[arg(long = "with", value_name = "NEW")]
    pub replacement: String,

    /// Which documents to update.
    #[arg(long, value_enum, default_value_t = ReplacementTarget::Both)]
    pub target: ReplacementTarget,

    /// Leave out readability in the updated report.
    #[arg(long)]
    pub basic: bool,

    /// Directory for the updated report.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,
}

/// Run a single replacement round.
#[instrument(name = "cmd_replace", skip_all, fields(word = %args.word, target = %args.target))]
pub fn cmd_replace(args: ReplaceArgs, config: &Config) -> anyhow::Result<()> {
    let mut options = config.analysis_options();
    if args.basic {
        options.include_readability = false;
    }
    let ctx = RunContext::from_config(config, options, args.output_dir)?;
    debug!(output_dir = %ctx.output_dir, "executing replace command");

    let round = Round {
        target: args.target,
        old_word: args.word,
        new_word: args.replacement,
    };
    run_round(&ctx, (&args.file_a, &args.file_b), &round)?;
    Ok(())
}

/// One replacement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Documents to update.
    pub target: ReplacementTarget,
    /// Word to find.
    pub old_word: String,
    /// Text to put in its place.
    pub new_word: String,
}

/// Apply a round to the original documents.
///
/// Each targeted document is rewritten to its `_updated` sibling. A document
/// without the word, or whose copy cannot be written, is reported and
/// skipped. When at least one copy was written the pair is re-analyzed,
/// `result_updated.txt` is written, and the new comparison is returned.
pub fn run_round(
    ctx: &RunContext,
    originals: (&Utf8Path, &Utf8Path),
    round: &Round,
) -> anyhow::Result<Option<Comparison>> {
    if round.old_word.is_empty() {
        return Err(ReplaceError::EmptyWord.into());
    }

    let targets = [
        (round.target.includes_first(), originals.0),
        (round.target.includes_second(), originals.1),
    ];
    let mut updated: [Option<Utf8PathBuf>; 2] = [None, None];
    for (slot, (selected, path)) in updated.iter_mut().zip(targets) {
        if selected {
            *slot = update_document(ctx, path, round)?;
        }
    }

    let [updated_a, updated_b] = &updated;
    let pair = round
        .target
        .report_pair(originals, updated_a.as_deref(), updated_b.as_deref());
    let Some((report_a, report_b)) = pair else {
        println!("No files were updated.");
        return Ok(None);
    };

    println!("\nGenerating updated analysis report...");
    let comparison = analyze_pair(ctx, report_a, report_b)?;
    let report = UpdatedReport::new(&comparison, &ctx.options, &round.old_word, &round.new_word);
    if let Some(path) = write_output(&ctx.output_dir, UPDATED_REPORT_FILE, &report.to_string()) {
        println!("Updated report saved to {path}");
    }
    console::print_updated_summary(&comparison, &round.old_word, &round.new_word)?;
    Ok(Some(comparison))
}

/// Replace the word in one document and write the updated copy.
///
/// Returns the path written, or `None` when the document was skipped.
fn update_document(
    ctx: &RunContext,
    path: &Utf8Path,
    round: &Round,
) -> anyhow::Result<Option<Utf8PathBuf>> {
    println!("\nProcessing: {path}");
    let document = match load_document(path, ctx.max_input) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(%path, error = %err, "could not load document for replacement");
            report_error(format_args!("could not load {path} for replacement: {err}"));
            return Ok(None);
        }
    };

    let replacement = replace_word_in_text(&document.raw, &round.old_word, &round.new_word)?;
    if replacement.count == 0 {
        let err = ReplaceError::WordNotFound {
            word: round.old_word.clone(),
            name: path.to_string(),
        };
        warn!(%path, word = %round.old_word, "word not found");
        println!("{err}");
        return Ok(None);
    }
    println!(
        "Found {} occurrence(s) of '{}'",
        replacement.count, round.old_word
    );

    let target = updated_path(path);
    if let Err(err) = std::fs::write(&target, &replacement.text) {
        tracing::error!(path = %target, error = %err, "failed to write updated document");
        report_error(format_args!("could not create output file {target}: {err}"));
        return Ok(None);
    }

    info!(original = %path, updated = %target, count = replacement.count, "document updated");
    println!(
        "{} replaced {} occurrence(s) of '{}' with '{}'",
        "Success:".if_supports_color(Stream::Stdout, |t| t.green()),
        replacement.count,
        round.old_word,
        round.new_word
    );
    println!("  Original file: {path}");
    println!("  Updated file:  {target}");
    Ok(Some(target))
}

/// Source of answers for the replacement prompts.
pub trait Prompter {
    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool>;

    /// Ask for a line of text.
    fn input(&mut self, prompt: &str, allow_empty: bool) -> anyhow::Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("failed to read answer")
    }

    fn input(&mut self, prompt: &str, allow_empty: bool) -> anyhow::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .context("failed to read input")
    }
}

/// Prompt for replacement rounds until the user declines.
///
/// Every round starts from the original documents. An invalid target
/// option ends the whole feature without touching any file. Returns the
/// number of rounds that ran.
pub fn interactive_loop(
    ctx: &RunContext,
    prompter: &mut impl Prompter,
    file_a: &Utf8Path,
    file_b: &Utf8Path,
) -> anyhow::Result<usize> {
    let mut rounds = 0;
    let mut prompt = "Would you like to replace a word in the documents?";
    while prompter.confirm(prompt)? {
        prompt = "Would you like to replace another word?";

        println!("\nReplacement options:");
        println!("  1. Replace word in both documents");
        println!("  2. Replace word in first document only ({file_a})");
        println!("  3. Replace word in second document only ({file_b})");
        let choice = prompter.input("Select option (1/2/3)", false)?;
        let target = match ReplacementTarget::from_menu_option(&choice) {
            Ok(target) => target,
            Err(err) => {
                warn!(choice = %choice.trim(), "invalid replacement option");
                report_error(err);
                return Ok(rounds);
            }
        };

        let old_word = prompter.input("Enter the word you want to replace", false)?;
        let new_word = prompter.input("Enter the replacement word", true)?;

        let round = Round {
            target,
            old_word: old_word.trim().to_string(),
            new_word,
        };
        rounds += 1;
        if let Err(err) = run_round(ctx, (file_a, file_b), &round) {
            tracing::error!(error = %err, "replacement round failed");
            report_error(format_args!("{err:#}"));
        }
    }

    println!("No further word replacement requested.");
    Ok(rounds)
}
