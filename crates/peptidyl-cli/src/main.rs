mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("Peptidyl CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    configure_thread_pool(cli.threads)?;

    let analysis = config::resolve(&cli.analysis)?;
    debug!(?analysis, "Resolved analysis configuration.");

    let result = match cli.command {
        Commands::Bonds(args) => commands::bonds::run(args, &analysis),
        Commands::Backbones(args) => commands::backbones::run(args, &analysis),
        Commands::Angles(args) => commands::angles::run(args, &analysis),
        Commands::Build(args) => commands::build::run(args),
        Commands::Dedup(args) => commands::dedup::run(args, &analysis),
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}

fn configure_thread_pool(threads: Option<usize>) -> Result<()> {
    let Some(num_threads) = threads else {
        return Ok(());
    };
    info!("Setting Rayon global thread pool to {} threads.", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e)))
}
