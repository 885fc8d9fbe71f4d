//! Task reconciliation.
//!
//! Each task is checked against the shared process snapshot and either
//! left alone or (re)launched. Every decision is written as a status block
//! to the run's output, in task order:
//!
//! ```text
//! Task: worker.sh
//!     => NOT RUNNING
//!     => START...
//!     cwd: /srv
//!     cmd: nohup worker.sh &
//! ```

use crate::error::Result;
use crate::launch::{Spawner, build_command};
use crate::process::ProcessSnapshot;
use crate::task::Task;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Pause after each launch.
pub const LAUNCH_PAUSE: Duration = Duration::from_secs(1);

/// Per-invocation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Dump the expanded config before processing.
    pub verbose: bool,
    /// Log launches without performing them.
    pub dry: bool,
    /// Pool this invocation serves; `None` serves tasks with no pool.
    pub pool: Option<String>,
}

/// Outcome for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Found in the snapshot; `line` is the matching process line.
    Running { line: String },
    /// Not running, but disabled.
    Disabled,
    /// Not running, but assigned to a pool this run does not serve.
    DifferentPool,
    /// Would have been launched with `command`.
    DryRun { command: String },
    /// Launched with `command`.
    Started { command: String },
    /// Spawning `command` failed; the pass continues.
    LaunchFailed { command: String, reason: String },
}

impl Decision {
    pub fn is_launch(&self) -> bool {
        matches!(self, Decision::Started { .. })
    }
}

/// Drives one reconciliation pass.
pub struct Reconciler<'a> {
    snapshot: &'a ProcessSnapshot,
    options: &'a RunOptions,
    spawner: &'a mut dyn Spawner,
    out: &'a mut dyn Write,
    launch_pause: Duration,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        snapshot: &'a ProcessSnapshot,
        options: &'a RunOptions,
        spawner: &'a mut dyn Spawner,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            snapshot,
            options,
            spawner,
            out,
            launch_pause: LAUNCH_PAUSE,
        }
    }

    /// Override the post-launch pause.
    pub fn with_launch_pause(mut self, pause: Duration) -> Self {
        self.launch_pause = pause;
        self
    }

    /// Reconcile every task, in order.
    pub fn run(&mut self, tasks: &[Task]) -> Result<Vec<Decision>> {
        tasks.iter().map(|task| self.reconcile(task)).collect()
    }

    /// Decide on (and possibly launch) one task.
    pub fn reconcile(&mut self, task: &Task) -> Result<Decision> {
        writeln!(self.out, "\nTask: {}", task.pattern)?;

        if let Some(line) = self.snapshot.find(&task.pattern) {
            writeln!(self.out, "\t=> RUNNING")?;
            writeln!(self.out, "\tps: {}", line)?;
            tracing::debug!(pattern = %task.pattern, "task running");
            return Ok(Decision::Running {
                line: line.to_string(),
            });
        }
        writeln!(self.out, "\t=> NOT RUNNING")?;

        if task.disabled {
            writeln!(self.out, "\t=> DISABLED")?;
            return Ok(Decision::Disabled);
        }

        if !task.in_pool(self.options.pool.as_deref()) {
            writeln!(self.out, "\t=> DIFFERENT POOL")?;
            tracing::debug!(
                pattern = %task.pattern,
                task_pool = ?task.pool,
                served_pool = ?self.options.pool,
                "skipping task from another pool"
            );
            return Ok(Decision::DifferentPool);
        }

        let command = build_command(&task.cmd, task.user.as_deref());

        if self.options.dry {
            writeln!(self.out, "\t=> DRY-RUN")?;
            writeln!(self.out, "\tcwd: {}", task.cwd)?;
            writeln!(self.out, "\tcmd: {}", command)?;
            return Ok(Decision::DryRun { command });
        }

        writeln!(self.out, "\t=> START...")?;
        writeln!(self.out, "\tcwd: {}", task.cwd)?;
        writeln!(self.out, "\tcmd: {}", command)?;
        self.out.flush()?;

        match self.spawner.spawn(&command, Path::new(&task.cwd)) {
            Ok(()) => {
                tracing::info!(cwd = %task.cwd, command = %command, "launched task");
                std::thread::sleep(self.launch_pause);
                Ok(Decision::Started { command })
            }
            Err(err) => {
                writeln!(self.out, "\t=> LAUNCH FAILED: {}", err)?;
                tracing::warn!(error = %err, "launch failed");
                Ok(Decision::LaunchFailed {
                    command,
                    reason: err.to_string(),
                })
            }
        }
    }
}
