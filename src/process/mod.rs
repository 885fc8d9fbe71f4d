//! Process table snapshots.
//!
//! Liveness is a substring test against one point-in-time `ps aux` dump.
//! The dump is taken once per run and never refreshed, so a task launched
//! earlier in a pass is not seen by later lookups in the same pass.

use crate::error::{Result, StillAliveError};
use std::process::Command;

/// Program and arguments used to list every process.
pub const PS_COMMAND: [&str; 2] = ["ps", "aux"];

/// Return the first line of `listing` containing `pattern`.
///
/// Plain substring matching: no regex, no token boundaries.
pub fn find<'a>(listing: &'a str, pattern: &str) -> Option<&'a str> {
    listing.lines().find(|line| line.contains(pattern))
}

/// A captured process listing.
#[derive(Debug, Clone, Default)]
pub struct ProcessSnapshot {
    listing: String,
}

impl ProcessSnapshot {
    /// Wrap an existing listing.
    pub fn from_listing(listing: impl Into<String>) -> Self {
        Self {
            listing: listing.into(),
        }
    }

    /// Run `ps aux` and keep its output.
    pub fn capture() -> Result<Self> {
        let [program, args @ ..] = PS_COMMAND;
        let output = Command::new(program).args(args).output().map_err(|e| {
            StillAliveError::SnapshotError(format!("failed to execute '{}': {}", program, e))
        })?;

        if !output.status.success() {
            return Err(StillAliveError::SnapshotError(format!(
                "'{}' exited with {:?}: {}",
                PS_COMMAND.join(" "),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let listing = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(lines = listing.lines().count(), "captured process listing");
        Ok(Self { listing })
    }

    /// First process line containing `pattern`.
    pub fn find(&self, pattern: &str) -> Option<&str> {
        find(&self.listing, pattern)
    }
}
