//! Diagnostic logging setup using `tracing` + `tracing-subscriber`.
//!
//! Status lines go to stdout; these diagnostics go to stderr.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `STILLALIVE_LOG` environment variable (any `EnvFilter` directive)
//! 3. default to `warn`

use crate::cli::LogLevel;
use tracing_subscriber::EnvFilter;

/// Environment variable read when no `--log-level` is given.
pub const LOG_ENV: &str = "STILLALIVE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive.
pub fn filter_directive(cli_level: Option<LogLevel>, env_value: Option<String>) -> String {
    match cli_level {
        Some(level) => level.as_str().to_string(),
        None => env_value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(cli_level: Option<LogLevel>) {
    let directive = filter_directive(cli_level, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
