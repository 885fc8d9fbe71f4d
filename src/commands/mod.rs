//! Command implementations for stillalive.
//!
//! There is a single command: one reconciliation pass over the configured
//! tasks. Usage output for `--help` is handled by `main`.

mod check;

pub use check::cmd_check;
