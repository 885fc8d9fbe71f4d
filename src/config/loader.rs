//! Config loading: comment stripping, JSON parsing, and required-key checks.

use super::model::GlobalConfig;
use super::placeholder::substitute;
use crate::error::{Result, StillAliveError};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "localSettings.json";

/// Top-level keys every config must define.
pub const REQUIRED_KEYS: [&str; 4] = ["template-tasks", "templates", "tasks", "cwd"];

static COMMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?://|#).*$").expect("comment pattern is valid")
});

/// Blank out lines whose first non-blank characters are `//` or `#`.
///
/// Line structure is preserved so JSON parse errors still point at the
/// right line number.
pub fn strip_comments(source: &str) -> String {
    COMMENT_LINE.replace_all(source, "").into_owned()
}

/// Parse a config document and check its required keys.
///
/// A key set to `null` counts as missing.
pub fn parse_document(source: &str) -> Result<Value> {
    let document: Value = serde_json::from_str(&strip_comments(source)).map_err(|e| {
        StillAliveError::ConfigError(format!(
            "SyntaxError while parsing JSON ({}). Ensure the config file contains valid JSON.",
            e
        ))
    })?;

    let Value::Object(ref root) = document else {
        return Err(StillAliveError::ConfigError(
            "config must be a JSON object at the top level".to_string(),
        ));
    };

    for key in REQUIRED_KEYS {
        if root.get(key).is_none_or(Value::is_null) {
            return Err(StillAliveError::MissingKey(key.to_string()));
        }
    }

    Ok(document)
}

/// Apply the document's own `parameters` to every string in it.
fn apply_parameters(document: Value) -> Value {
    let params = match document.get("parameters") {
        Some(Value::Object(params)) if !params.is_empty() => params.clone(),
        _ => return document,
    };
    substitute(document, &params)
}

impl GlobalConfig {
    /// Load config from a file.
    ///
    /// # Returns
    ///
    /// * `Ok(GlobalConfig)` - Parsed config with global parameters applied
    /// * `Err(StillAliveError)` - Unreadable file, invalid JSON, or missing keys
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StillAliveError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json_str(&content)
    }

    /// Parse config from a JSON string (comment lines allowed).
    pub fn from_json_str(source: &str) -> Result<Self> {
        let document = apply_parameters(parse_document(source)?);
        Self::from_document(document)
    }

    /// Build a typed config from an already-parsed document.
    pub fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document)
            .map_err(|e| StillAliveError::ConfigError(format!("invalid config: {}", e)))
    }

    /// Pretty JSON rendering used by `--verbose`.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StillAliveError::ConfigError(format!("failed to serialize config: {}", e))
        })
    }
}
