//! Process spawning.

use crate::error::{Result, StillAliveError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that can start a shell command line.
///
/// Production code uses [`ShellSpawner`]; tests record launches instead.
pub trait Spawner {
    /// Start `command` with `cwd` as its working directory.
    ///
    /// Must not wait for the task itself to finish.
    fn spawn(&mut self, command: &str, cwd: &Path) -> Result<()>;
}

/// Runs commands through `sh -c` with all stdio detached.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellSpawner;

impl Spawner for ShellSpawner {
    fn spawn(&mut self, command: &str, cwd: &Path) -> Result<()> {
        let launch_error = |reason: String| StillAliveError::LaunchError {
            command: command.to_string(),
            reason,
        };

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| launch_error(format!("cwd '{}': {}", cwd.display(), e)))?;

        // The command line ends in `&`, so the shell itself exits at once.
        // Reaping it keeps us from leaving a zombie behind.
        let status = child
            .wait()
            .map_err(|e| launch_error(format!("failed to wait for shell: {}", e)))?;
        tracing::debug!(?status, command, "launch shell exited");

        Ok(())
    }
}
