//! Resolved task values.
//!
//! A [`Task`] is a config [`TaskEntry`] with every default filled in. Tasks
//! are resolved once, up front, so a malformed entry aborts the run before
//! anything is launched.

use crate::config::{GlobalConfig, TaskEntry, TaskRecord, TaskUser};
use crate::error::{Result, StillAliveError};

/// A fully-resolved unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Shell command to launch.
    pub cmd: String,
    /// Working directory for the launch.
    pub cwd: String,
    /// User to launch as, if any.
    pub user: Option<String>,
    /// Substring whose presence in the process listing means "running".
    pub pattern: String,
    /// Pool label; `None` means the task belongs to no pool.
    pub pool: Option<String>,
    pub disabled: bool,
}

impl Task {
    /// Resolve one config entry against global defaults.
    ///
    /// `index` is the entry's position in the task list, used in errors.
    pub fn resolve(
        entry: &TaskEntry,
        index: usize,
        default_cwd: &str,
        default_user: Option<&str>,
    ) -> Result<Self> {
        let record = match entry {
            TaskEntry::BareCommand(cmd) => TaskRecord {
                cmd: Some(cmd.clone()),
                ..TaskRecord::default()
            },
            TaskEntry::Record(record) => record.clone(),
        };

        let cmd = record
            .cmd
            .filter(|cmd| !cmd.trim().is_empty())
            .ok_or(StillAliveError::MissingCommand { index })?;

        // An empty pattern would match every line, so fall back to the command
        let pattern = record
            .pattern
            .filter(|pattern| !pattern.is_empty())
            .unwrap_or_else(|| cmd.clone());

        Ok(Self {
            cwd: record.cwd.unwrap_or_else(|| default_cwd.to_string()),
            user: match record.user {
                None => default_user.map(str::to_string),
                Some(TaskUser::NoSwitch) => None,
                Some(TaskUser::Named(user)) => Some(user),
            },
            pattern,
            pool: record.pool,
            disabled: record.disabled,
            cmd,
        })
    }

    /// Whether this task belongs to the pool a run serves.
    ///
    /// Exact comparison; "no pool" only equals "no pool".
    pub fn in_pool(&self, served: Option<&str>) -> bool {
        self.pool.as_deref() == served
    }
}

/// Resolve every task of an expanded config, in order.
pub fn resolve_all(config: &GlobalConfig) -> Result<Vec<Task>> {
    config
        .tasks
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Task::resolve(entry, index, &config.cwd, config.user.as_deref())
        })
        .collect()
}
