use crate::error::{Result, StillAliveError};
use crate::launch::Spawner;
use std::path::{Path, PathBuf};

/// A spawner that records launches instead of running them.
#[derive(Debug, Default)]
pub(crate) struct FakeSpawner {
    pub(crate) launches: Vec<(String, PathBuf)>,
    /// When set, every spawn fails with this reason.
    pub(crate) fail_with: Option<String>,
}

impl FakeSpawner {
    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            launches: Vec::new(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub(crate) fn commands(&self) -> Vec<&str> {
        self.launches.iter().map(|(cmd, _)| cmd.as_str()).collect()
    }
}

impl Spawner for FakeSpawner {
    fn spawn(&mut self, command: &str, cwd: &Path) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(StillAliveError::LaunchError {
                command: command.to_string(),
                reason: reason.clone(),
            });
        }
        self.launches.push((command.to_string(), cwd.to_path_buf()));
        Ok(())
    }
}

pub(crate) fn task(cmd: &str) -> crate::task::Task {
    crate::task::Task {
        cmd: cmd.to_string(),
        cwd: "/srv".to_string(),
        user: None,
        pattern: cmd.to_string(),
        pool: None,
        disabled: false,
    }
}
