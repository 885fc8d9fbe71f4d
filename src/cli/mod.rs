//! CLI argument parsing for stillalive.
//!
//! Uses clap derive macros. clap's built-in help flag is replaced by our
//! own `--help` so that showing usage exits with status 1.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::reconcile::RunOptions;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// Stillalive: make sure all configured tasks are running.
///
/// Inspects the process table once, then (re)launches every configured
/// task that is missing, unless it is disabled or belongs to another pool.
#[derive(Parser, Debug)]
#[command(name = "stillalive")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Dry run (won't actually execute any tasks).
    #[arg(long)]
    pub dry: bool,

    /// Only tasks in this pool will be kept alive. If not specified, only
    /// tasks with no pool target will be kept alive on this node. A bare
    /// `--pool` selects the empty pool id.
    #[arg(
        long,
        value_name = "POOL-ID",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub pool: Option<String>,

    /// Be verbose in output.
    #[arg(long)]
    pub verbose: bool,

    /// Path to the JSON config file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Diagnostic log level (overrides STILLALIVE_LOG).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Show this message.
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,
}

/// Diagnostic log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Rendered usage text.
    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }

    /// The per-run options the reconciler needs.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            verbose: self.verbose,
            dry: self.dry,
            pool: self.pool.clone(),
        }
    }
}
