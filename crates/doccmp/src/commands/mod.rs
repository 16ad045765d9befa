//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use doccmp_core::config::{AnalysisOptions, Config};
use doccmp_core::similarity::{Comparison, compare};
use doccmp_core::stats::analyze;
use doccmp_core::load_document;
use owo_colors::{OwoColorize, Stream};

pub mod compare;
pub mod info;
pub mod replace;

/// Settings shared by the commands that analyze documents.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Which report sections and files to produce.
    pub options: AnalysisOptions,
    /// Directory that receives reports and visualizations.
    pub output_dir: Utf8PathBuf,
    /// Input size limit in bytes, `None` when disabled.
    pub max_input: Option<usize>,
}

impl RunContext {
    /// Build from the loaded configuration, creating the output directory.
    pub fn from_config(
        config: &Config,
        options: AnalysisOptions,
        output_dir: Option<Utf8PathBuf>,
    ) -> anyhow::Result<Self> {
        let output_dir = output_dir
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("failed to create output directory {output_dir}"))?;
        Ok(Self {
            options,
            output_dir,
            max_input: config.input_limit(),
        })
    }
}

/// Print an error line to stderr.
pub fn report_error(message: impl std::fmt::Display) {
    eprintln!(
        "{} {message}",
        "error:".if_supports_color(Stream::Stderr, |t| t.red())
    );
}

/// Load and analyze both documents, then compare them.
///
/// Every document that fails is reported before the run is aborted.
pub fn analyze_pair(ctx: &RunContext, a: &Utf8Path, b: &Utf8Path) -> anyhow::Result<Comparison> {
    let analyze_one = |path: &Utf8Path| {
        load_document(path, ctx.max_input).and_then(|doc| analyze(&doc, &ctx.options))
    };

    match (analyze_one(a), analyze_one(b)) {
        (Ok(stats_a), Ok(stats_b)) => Ok(compare(stats_a, stats_b)),
        (first, second) => {
            let failed = [first.err(), second.err()]
                .into_iter()
                .flatten()
                .inspect(|err| {
                    tracing::error!(error = %err, "document failed");
                    report_error(err);
                })
                .count();
            anyhow::bail!("could not process {failed} of 2 documents")
        }
    }
}

/// Write one output file into the output directory.
///
/// A failed write is reported and logged; the caller carries on without it.
pub fn write_output(dir: &Utf8Path, name: &str, contents: &str) -> Option<Utf8PathBuf> {
    let path = dir.join(name);
    match std::fs::write(&path, contents) {
        Ok(()) => {
            tracing::info!(%path, bytes = contents.len(), "output written");
            Some(path)
        }
        Err(err) => {
            tracing::error!(%path, error = %err, "failed to write output");
            report_error(format_args!("cannot create {path}: {err}"));
            None
        }
    }
}
