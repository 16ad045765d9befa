//! Compare command: analyze two documents and write the reports.

use std::io::IsTerminal;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use dialoguer::Input;
use doccmp_core::config::Config;
use doccmp_core::report::{
    CHART_FILE, ComparisonChart, DetailedReport, REPORT_FILE, WORD_CLOUD_A_FILE,
    WORD_CLOUD_B_FILE, WordCloud,
};
use doccmp_core::similarity::Comparison;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use super::{RunContext, analyze_pair, replace, write_output};
use crate::console;

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    /// First document (prompted for when omitted).
    pub file_a: Option<Utf8PathBuf>,

    /// Second document (prompted for when omitted).
    pub file_b: Option<Utf8PathBuf>,

    /// Skip the interactive word replacement step.
    #[arg(long)]
    pub no_replace: bool,

    /// Leave out readability analysis and document insights.
    #[arg(long)]
    pub basic: bool,

    /// Do not write word clouds or the comparison chart.
    #[arg(long)]
    pub no_visualization: bool,

    /// Number of most frequent words to list per document.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Directory for reports and visualizations.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,
}

impl CompareArgs {
    fn context(&self, config: &Config) -> anyhow::Result<RunContext> {
        let mut options = config.analysis_options();
        if self.basic {
            options.include_readability = false;
        }
        if self.no_visualization {
            options.include_visualization = false;
        }
        if let Some(top) = self.top {
            options.top_word_count = top;
        }
        RunContext::from_config(config, options, self.output_dir.clone())
    }
}

/// Analyze and compare two documents.
#[instrument(name = "cmd_compare", skip_all, fields(file_a = ?args.file_a, file_b = ?args.file_b))]
pub fn cmd_compare(args: CompareArgs, config: &Config) -> anyhow::Result<()> {
    let ctx = args.context(config)?;
    debug!(options = ?ctx.options, output_dir = %ctx.output_dir, "executing compare command");

    let file_a = resolve_path(args.file_a.clone(), "Enter path to the first document")?;
    let file_b = resolve_path(args.file_b.clone(), "Enter path to the second document")?;

    let comparison = analyze_pair(&ctx, &file_a, &file_b)?;
    console::print_comparison(&comparison, &ctx.options)?;

    let written = write_reports(&ctx, &comparison);
    console::print_generated_files(&written)?;

    if args.no_replace || !std::io::stdin().is_terminal() {
        debug!("skipping interactive replacement");
        return Ok(());
    }
    let rounds =
        replace::interactive_loop(&ctx, &mut replace::TerminalPrompter, &file_a, &file_b)?;
    debug!(rounds, "interactive replacement finished");
    Ok(())
}

/// Use the given path or ask for one.
fn resolve_path(given: Option<Utf8PathBuf>, prompt: &str) -> anyhow::Result<Utf8PathBuf> {
    if let Some(path) = given {
        return Ok(path);
    }
    let entered: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .context("failed to read document path")?;
    Ok(Utf8PathBuf::from(entered.trim()))
}

/// Write the detailed report and, when enabled, the visualizations.
///
/// Returns the files that were written; failures are reported and skipped.
pub fn write_reports(ctx: &RunContext, comparison: &Comparison) -> Vec<Utf8PathBuf> {
    let dir: &Utf8Path = &ctx.output_dir;
    let mut outputs = vec![(
        REPORT_FILE,
        DetailedReport::new(comparison, &ctx.options).to_string(),
    )];
    if ctx.options.include_visualization {
        outputs.push((WORD_CLOUD_A_FILE, WordCloud(&comparison.a).to_string()));
        outputs.push((WORD_CLOUD_B_FILE, WordCloud(&comparison.b).to_string()));
        outputs.push((CHART_FILE, ComparisonChart(comparison).to_string()));
    }

    let written: Vec<Utf8PathBuf> = outputs
        .into_iter()
        .filter_map(|(name, contents)| write_output(dir, name, &contents))
        .collect();

    if written.first().is_some_and(|p| p.file_name() == Some(REPORT_FILE)) {
        println!(
            "\n{} detailed report saved to {}",
            "Analysis complete:".if_supports_color(Stream::Stdout, |t| t.green()),
            dir.join(REPORT_FILE)
        );
    }
    written
}
