//! `jwmrc` command-line entry point.
use std::process::ExitCode;

use clap::Parser;

use jwmrc::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let result = match args.command {
        cli::Command::Check => commands::check::run(&args.global, &log),
        cli::Command::Dump => commands::dump::run(&args.global, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };

    // Load failures were already reported as diagnostics.
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
