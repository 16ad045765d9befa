//! Info command implementation

use clap::Args;
use doccmp_core::config::{Config, ConfigSources};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    /// Output as JSON (for scripting)
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    output_dir: String,
    include_readability: bool,
    include_visualization: bool,
    top_word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            output_dir: config
                .output_dir
                .as_ref()
                .map_or_else(|| ".".to_string(), |p| p.to_string()),
            include_readability: config.include_readability,
            include_visualization: config.include_visualization,
            top_word_count: config.top_word_count,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output = args.json))]
pub fn cmd_info(args: InfoArgs, config: &Config, sources: &ConfigSources) -> anyhow::Result<()> {
    debug!("executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!(
        "{} {}",
        package.name.if_supports_color(Stream::Stdout, |t| t.bold()),
        package.version.if_supports_color(Stream::Stdout, |t| t.green())
    );
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    print_field("License", package.license);
    print_field("Repository", package.repository);

    let cfg = &full_info.config;
    println!();
    println!(
        "{}",
        "Configuration".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    print_field(
        "Config file",
        cfg.config_file.as_deref().unwrap_or("none loaded"),
    );
    print_field("Log level", &cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        print_field("Log directory", dir);
    }
    print_field("Output directory", &cfg.output_dir);
    print_field("Readability", on_off(cfg.include_readability));
    print_field("Visualization", on_off(cfg.include_visualization));
    print_field("Top words", &cfg.top_word_count.to_string());
    print_field(
        "Input limit",
        &cfg.max_input_bytes
            .map_or_else(|| "disabled".to_string(), |n| format!("{n} bytes")),
    );

    Ok(())
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Print a labelled value, skipping empty ones.
fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!(
            "{}: {value}",
            label.if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    }
}
