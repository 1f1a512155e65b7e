use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
};

/// Module-path prefix shared by the library and the binary.
const CRATE_TARGET: &str = "peptidyl";

/// Verbosity for events emitted by this program's own crates.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Console filter: `-v` flags raise only the peptidyl targets; dependencies
/// never log below WARN.
pub fn console_targets(verbosity: u8, quiet: bool) -> Targets {
    let level = level_filter(verbosity, quiet);
    Targets::new()
        .with_default(level.min(LevelFilter::WARN))
        .with_target(CRATE_TARGET, level)
}

/// Log file filter: at least DEBUG for the peptidyl targets, even with `-q`.
pub fn file_targets(verbosity: u8) -> Targets {
    let level = level_filter(verbosity, false).max(LevelFilter::DEBUG);
    Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target(CRATE_TARGET, level)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console_targets(verbosity, quiet));

    let subscriber = tracing_subscriber::registry().with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .with_filter(file_targets(verbosity));

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}
