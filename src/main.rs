//! Stillalive: keep long-running tasks alive.
//!
//! This is the main entry point for the `stillalive` CLI. It parses
//! arguments, runs one reconciliation pass, and maps errors to exit codes.
//! Meant to be invoked repeatedly by an external scheduler such as cron.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod launch;
pub mod logging;
pub mod process;
pub mod reconcile;
pub mod task;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if cli.help {
        println!("{}", Cli::usage());
        return ExitCode::from(exit_codes::HELP_SHOWN as u8);
    }

    logging::init_logging(cli.log_level);

    match commands::cmd_check(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Diagnostics go to stdout alongside the status lines
            println!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
