//! Template expansion.
//!
//! Each instance in `template-tasks` yields one literal task: a fresh copy
//! of its template with the instance's fields substituted as placeholders,
//! then the instance's override keys laid on top. Expanded tasks are
//! appended after the literal `tasks`, in template then instance order.

use super::model::{GlobalConfig, TaskEntry, TaskRecord, TemplateInstance, TemplateTasks};
use super::placeholder::substitute;
use crate::error::{Result, StillAliveError};
use serde_json::{Map, Value};

/// Instance keys that replace the template's value outright when present.
pub const OVERRIDE_KEYS: [&str; 6] = ["cmd", "cwd", "user", "match", "pool", "disabled"];

/// Expand every template instance into the task list.
///
/// Consumes the config so expansion can only happen once per load; the
/// returned config has an empty `template-tasks` table.
pub fn expand(config: GlobalConfig) -> Result<GlobalConfig> {
    let GlobalConfig {
        templates,
        template_tasks,
        mut tasks,
        cwd,
        user,
        parameters,
    } = config;

    for (template_id, instances) in template_tasks {
        let definition = templates.get(&template_id).unwrap_or(&Value::Null);
        for (position, instance) in instances.iter().enumerate() {
            tasks.push(instantiate(&template_id, position, definition, instance)?);
        }
    }

    Ok(GlobalConfig {
        templates,
        template_tasks: TemplateTasks::default(),
        tasks,
        cwd,
        user,
        parameters,
    })
}

/// Build one task from a template definition and an instance.
///
/// `definition` is only read; the task is built from a deep copy.
pub fn instantiate(
    template_id: &str,
    position: usize,
    definition: &Value,
    instance: &TemplateInstance,
) -> Result<TaskEntry> {
    let mut record = match substitute(definition.clone(), instance) {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        Value::String(cmd) => Map::from_iter([("cmd".to_string(), Value::String(cmd))]),
        other => {
            return Err(StillAliveError::ConfigError(format!(
                "templates.{} must be an object or a command string, found {}",
                template_id, other
            )));
        }
    };

    for key in OVERRIDE_KEYS {
        match instance.get(key) {
            Some(Value::Null) | None => {}
            Some(value) => {
                record.insert(key.to_string(), value.clone());
            }
        }
    }

    serde_json::from_value::<TaskRecord>(Value::Object(record))
        .map(TaskEntry::Record)
        .map_err(|e| {
            StillAliveError::ConfigError(format!(
                "invalid task from template-tasks.{}[{}]: {}",
                template_id, position, e
            ))
        })
}
