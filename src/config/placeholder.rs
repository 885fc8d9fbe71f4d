//! Placeholder substitution over config trees.
//!
//! # Syntax
//!
//! - `{name}` - Replaced by the value of parameter `name`, if known
//!   (`true` renders as `1`, `false` as the empty string)
//! - Any other `{...}` text is left exactly as written
//!
//! Substitution is lenient: unknown names, unmatched braces, and empty
//! names pass through untouched. Replacement text is never rescanned, so a
//! parameter value containing `{other}` is inserted literally.

use serde_json::{Map, Value};

/// Substitute parameters into every string of a config subtree.
///
/// Mappings and sequences are walked recursively; object keys are not
/// rewritten. Returns the rewritten tree, leaving `params` untouched.
///
/// # Examples
///
/// ```ignore
/// let params = json!({"root": "/srv/bot"});
/// let out = substitute(json!({"cwd": "{root}/run"}), params.as_object().unwrap());
/// assert_eq!(out, json!({"cwd": "/srv/bot/run"}));
/// ```
pub fn substitute(value: Value, params: &Map<String, Value>) -> Value {
    match value {
        Value::String(s) => Value::String(render(&s, params)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| substitute(item, params))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, substitute(item, params)))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Render one string, replacing `{name}` for every known parameter.
pub fn render(template: &str, params: &Map<String, Value>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            // Unmatched brace: keep the remainder verbatim
            result.push_str(&rest[open..]);
            return result;
        };

        let name = &after_open[..close];
        match params.get(name).and_then(parameter_text) {
            Some(text) => {
                result.push_str(&text);
                rest = &after_open[close + 1..];
            }
            None => {
                // Not ours; emit the brace and rescan from the next char so
                // nested forms like `{{name}` still resolve the inner token.
                result.push('{');
                rest = after_open;
            }
        }
    }

    result.push_str(rest);
    result
}

/// The string form of a parameter value, or `None` if it can't be inlined.
fn parameter_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
