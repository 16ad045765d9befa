//! Logging setup for the CLI.
//!
//! Two layers share one [`EnvFilter`]: a compact console layer on stderr that
//! only shows warnings unless `-v` is given, and a JSONL file layer written
//! through a non-blocking `tracing-appender` worker. The file layer is
//! skipped when no writable log directory can be found.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "DOCCMP_LOG_PATH";
const LOG_DIR_ENV: &str = "DOCCMP_LOG_DIR";
const LOG_FILE_NAME: &str = "doccmp.jsonl";

/// Where the file log goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Full path of the JSONL log file, if one could be resolved.
    pub log_file: Option<PathBuf>,
    /// Show info-level events on the console too.
    pub verbose_console: bool,
}

impl ObservabilityConfig {
    /// Resolve the log file location.
    ///
    /// Precedence: `DOCCMP_LOG_PATH`, then `DOCCMP_LOG_DIR`, then the
    /// configured `log_dir`, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_file = std::env::var_os(LOG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os(LOG_DIR_ENV)
                    .map(PathBuf::from)
                    .or(config_log_dir)
                    .or_else(|| {
                        doccmp_core::config::user_data_local_dir()
                            .map(|dir| dir.join("logs").into_std_path_buf())
                    })
                    .map(|dir| dir.join(LOG_FILE_NAME))
            });
        Self {
            log_file,
            verbose_console: false,
        }
    }

    /// Enable info-level console output.
    #[must_use]
    pub const fn with_verbose_console(mut self, verbose: bool) -> Self {
        self.verbose_console = verbose;
        self
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set and valid. Otherwise `-q` means errors only,
/// `-v` debug, `-vv` trace, and the configured level applies by default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file log when dropped; keep it alive for
/// the whole run.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_level = if config.verbose_console {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(console_level);

    let (file_layer, guard) = match config.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Open the log file for appending, creating its directory first.
fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}
