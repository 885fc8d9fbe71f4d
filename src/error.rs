//! Error types for the stillalive CLI.
//!
//! Uses thiserror for derive macros. Only fatal conditions are errors;
//! per-task outcomes (running, disabled, other pool) are reported as status lines.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for stillalive operations.
#[derive(Error, Debug)]
pub enum StillAliveError {
    /// The config file is missing, unreadable, or not valid JSON.
    #[error("{0}")]
    ConfigError(String),

    /// A required top-level key is absent from the config.
    #[error("Required key '{0}' must exist in the config file.")]
    MissingKey(String),

    /// A task resolved without a `cmd` property.
    #[error("Missing \"cmd\" property in tasks[{index}].")]
    MissingCommand { index: usize },

    /// The process listing could not be captured.
    #[error("Failed to capture process listing: {0}")]
    SnapshotError(String),

    /// A task command could not be spawned.
    #[error("Failed to launch '{command}': {reason}")]
    LaunchError { command: String, reason: String },

    /// Writing status output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StillAliveError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StillAliveError::ConfigError(_)
            | StillAliveError::MissingKey(_)
            | StillAliveError::MissingCommand { .. } => exit_codes::CONFIG_ERROR,
            StillAliveError::SnapshotError(_)
            | StillAliveError::LaunchError { .. }
            | StillAliveError::Io(_) => exit_codes::RUNTIME_ERROR,
        }
    }
}

/// Result type alias for stillalive operations.
pub type Result<T> = std::result::Result<T, StillAliveError>;
