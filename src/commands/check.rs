//! The reconciliation pass.
//!
//! Load config, expand templates, snapshot the process table, then decide
//! and perform launches for every task.

use crate::cli::Cli;
use crate::config::{GlobalConfig, expand};
use crate::error::Result;
use crate::launch::{ShellSpawner, Spawner};
use crate::process::ProcessSnapshot;
use crate::reconcile::{Decision, LAUNCH_PAUSE, Reconciler, RunOptions};
use crate::task::resolve_all;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;

/// Run one pass using the real process table and spawner.
pub fn cmd_check(cli: &Cli) -> Result<()> {
    let options = cli.run_options();
    let config = expand(GlobalConfig::load(&cli.config)?)?;
    tracing::debug!(
        config = %cli.config.display(),
        tasks = config.tasks.len(),
        "config loaded"
    );

    let snapshot = ProcessSnapshot::capture()?;
    let mut spawner = ShellSpawner;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    run_pass(
        &config,
        &snapshot,
        &options,
        &mut spawner,
        &mut out,
        LAUNCH_PAUSE,
    )?;
    Ok(())
}

/// Reconcile an expanded config against a snapshot.
///
/// Every task is resolved before the first decision, so a task without a
/// command fails the pass before anything is launched.
pub fn run_pass(
    config: &GlobalConfig,
    snapshot: &ProcessSnapshot,
    options: &RunOptions,
    spawner: &mut dyn Spawner,
    out: &mut dyn Write,
    launch_pause: Duration,
) -> Result<Vec<Decision>> {
    if options.verbose {
        writeln!(out, "-- Expanded settings:\n")?;
        writeln!(out, "{}", config.to_pretty_json()?)?;
        writeln!(out, "\n-- {}", run_header(options))?;
        writeln!(out, "\n-- Check the tasks:")?;
    }

    let tasks = resolve_all(config)?;
    let decisions = Reconciler::new(snapshot, options, spawner, out)
        .with_launch_pause(launch_pause)
        .run(&tasks)?;

    let started = decisions.iter().filter(|d| d.is_launch()).count();
    let running = decisions
        .iter()
        .filter(|d| matches!(d, Decision::Running { .. }))
        .count();
    tracing::info!(
        tasks = tasks.len(),
        running,
        started,
        dry = options.dry,
        "reconciliation pass complete"
    );

    Ok(decisions)
}

/// One-line description of this invocation: time, host, and pool.
fn run_header(options: &RunOptions) -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    let pool = match &options.pool {
        Some(pool) => format!("pool '{}'", pool),
        None => "no pool".to_string(),
    };
    let mode = if options.dry { " (dry run)" } else { "" };

    format!("Run at {} on {}, serving {}{}", Utc::now().to_rfc3339(), host, pool, mode)
}
