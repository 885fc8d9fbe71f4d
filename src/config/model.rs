//! Config data model.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Override values applied on top of a template to produce one task.
///
/// Every field of an instance is also a placeholder parameter for the
/// template copy it produces.
pub type TemplateInstance = Map<String, Value>;

/// The parsed config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Template id to base task definition.
    pub templates: Map<String, Value>,

    /// Template id to the ordered instances of that template.
    #[serde(rename = "template-tasks")]
    pub template_tasks: TemplateTasks,

    /// Literal tasks, in declaration order.
    pub tasks: Vec<TaskEntry>,

    /// Default working directory for tasks that don't set one.
    pub cwd: String,

    /// Default user for tasks that don't set one.
    #[serde(
        default,
        deserialize_with = "optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<String>,

    /// Global placeholder parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

/// A literal entry of the `tasks` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskEntry {
    /// A bare command string, e.g. `"php bot.php"`.
    BareCommand(String),
    /// A full task record.
    Record(TaskRecord),
}

impl From<&str> for TaskEntry {
    fn from(cmd: &str) -> Self {
        TaskEntry::BareCommand(cmd.to_string())
    }
}

/// A task as written in the config, before defaults are filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// `None` inherits the global user.
    #[serde(
        default,
        deserialize_with = "task_user",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<TaskUser>,

    /// Substring looked up in the process listing.
    #[serde(
        rename = "match",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub pool: Option<String>,

    /// Only the JSON literal `true` disables a task.
    #[serde(default, deserialize_with = "strict_true")]
    pub disabled: bool,
}

/// An explicit per-task user setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUser {
    /// `"user": false`: launch without switching user, even if a global
    /// user is configured.
    NoSwitch,
    /// Launch as this user.
    Named(String),
}

impl TaskUser {
    pub fn named(user: &str) -> Self {
        TaskUser::Named(user.to_string())
    }
}

impl Serialize for TaskUser {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TaskUser::NoSwitch => serializer.serialize_bool(false),
            TaskUser::Named(user) => serializer.serialize_str(user),
        }
    }
}

/// Ordered `template-tasks` table.
///
/// Keeps the document order of template ids so expansion is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TemplateTasks(Vec<(String, Vec<TemplateInstance>)>);

impl TemplateTasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for TemplateTasks {
    type Item = (String, Vec<TemplateInstance>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFrom<Map<String, Value>> for TemplateTasks {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut entries = Vec::with_capacity(map.len());
        for (template_id, value) in map {
            let Value::Array(items) = value else {
                return Err(format!(
                    "template-tasks.{} must be a list of instances",
                    template_id
                ));
            };
            let mut instances = Vec::with_capacity(items.len());
            for (position, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(instance) => instances.push(instance),
                    _ => {
                        return Err(format!(
                            "template-tasks.{}[{}] must be an object",
                            template_id, position
                        ));
                    }
                }
            }
            entries.push((template_id, instances));
        }
        Ok(Self(entries))
    }
}

impl Serialize for TemplateTasks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (template_id, instances) in &self.0 {
            map.serialize_entry(template_id, instances)?;
        }
        map.end()
    }
}

/// A string label, where `false` and `null` mean "not set".
fn optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null | Value::Bool(false) => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or false, found {}",
            other
        ))),
    }
}

/// A task's user: a name, `false` for "no user", `null` for "not set".
fn task_user<'de, D>(deserializer: D) -> Result<Option<TaskUser>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(TaskUser::Named(s))),
        Value::Bool(false) => Ok(Some(TaskUser::NoSwitch)),
        Value::Null => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected a user name or false, found {}",
            other
        ))),
    }
}

fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
