//! Exit code constants for the stillalive CLI.
//!
//! - 0: Success (including runs where tasks were skipped)
//! - 1: Help was shown, or the run aborted on a fatal error

/// Successful reconciliation pass.
pub const SUCCESS: i32 = 0;

/// `--help` was requested; usage is printed and the run stops.
pub const HELP_SHOWN: i32 = 1;

/// Configuration could not be loaded, was missing keys, or held an invalid task.
pub const CONFIG_ERROR: i32 = 1;

/// The process listing could not be captured.
pub const RUNTIME_ERROR: i32 = 1;
