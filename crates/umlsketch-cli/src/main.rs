//! umlsketch CLI entry point.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use umlsketch_cli::{Args, error_adapter::render_reports};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logger(&args.log_level);

    info!(log_level:?; "Starting umlsketch");
    debug!(args:?; "Parsed arguments");

    match umlsketch_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let handler = GraphicalReportHandler::new();
            for report in render_reports(&err, &handler) {
                error!("{report}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Install the logger at `level`, falling back to `warn` for unknown names.
fn init_logger(level: &str) -> LevelFilter {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    log_level
}
