//! Tests for config loading and template expansion.

use crate::config::{
    GlobalConfig, REQUIRED_KEYS, TaskEntry, TaskRecord, TaskUser, expand, instantiate, parse_document,
    strip_comments,
};
use crate::error::StillAliveError;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
{
    // Shared settings
    "parameters": {
        "root": "/srv/bots"
    },
    "cwd": "{root}",
    "user": false,
    # Templates are instantiated once per entry below
    "templates": {
        "irc": {
            "cmd": "php {root}/irc.php --channel={channel}",
            "match": "irc.php --channel={channel}"
        }
    },
    "template-tasks": {
        "irc": [
            { "channel": "dev" },
            { "channel": "ops", "pool": "east", "disabled": true }
        ]
    },
    "tasks": [
        "node {root}/web.js",
        { "cmd": "./worker.sh", "cwd": "/opt/worker", "user": "deploy" }
    ]
}
"#;

fn record(entry: &TaskEntry) -> &TaskRecord {
    match entry {
        TaskEntry::Record(record) => record,
        TaskEntry::BareCommand(cmd) => panic!("expected a record, got bare command {:?}", cmd),
    }
}

fn instance(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("instance must be an object"),
    }
}

#[test]
fn test_strip_comment_lines() {
    let src = "{\n  // note\n  # another\n  \"a\": \"http://x\"\n}";
    let stripped = strip_comments(src);
    assert!(!stripped.contains("note"));
    assert!(!stripped.contains("another"));
    // Only whole-line comments are removed
    assert!(stripped.contains("\"a\": \"http://x\""));
    assert_eq!(stripped.lines().count(), src.lines().count());
}

#[test]
fn test_load_applies_parameters() {
    let config = GlobalConfig::from_json_str(SAMPLE).unwrap();

    assert_eq!(config.cwd, "/srv/bots");
    assert_eq!(config.user, None);
    assert_eq!(
        config.tasks[0],
        TaskEntry::BareCommand("node /srv/bots/web.js".to_string())
    );
    assert_eq!(
        config.templates["irc"]["cmd"],
        json!("php /srv/bots/irc.php --channel={channel}")
    );
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = GlobalConfig::load(file.path()).unwrap();
    assert_eq!(config.tasks.len(), 2);
    assert_eq!(config.template_tasks.len(), 1);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GlobalConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StillAliveError::ConfigError(_)));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_invalid_json_is_config_error() {
    let err = GlobalConfig::from_json_str("{ \"cwd\": ").unwrap_err();
    assert!(matches!(err, StillAliveError::ConfigError(_)));
    assert!(err.to_string().contains("SyntaxError"));
}

#[test]
fn test_non_object_document_rejected() {
    let err = parse_document("[1, 2]").unwrap_err();
    assert!(matches!(err, StillAliveError::ConfigError(_)));
}

#[test]
fn test_each_required_key_is_enforced() {
    let full = json!({
        "template-tasks": {},
        "templates": {},
        "tasks": [],
        "cwd": "/tmp"
    });

    for key in REQUIRED_KEYS {
        let mut doc = full.clone();
        doc.as_object_mut().unwrap().remove(key);
        let err = parse_document(&doc.to_string()).unwrap_err();
        match err {
            StillAliveError::MissingKey(missing) => assert_eq!(missing, key),
            other => panic!("unexpected error for {}: {:?}", key, other),
        }
    }
}

#[test]
fn test_null_required_key_counts_as_missing() {
    let src = r#"{"template-tasks": {}, "templates": {}, "tasks": null, "cwd": "/tmp"}"#;
    let err = parse_document(src).unwrap_err();
    assert!(matches!(err, StillAliveError::MissingKey(ref k) if k == "tasks"));
}

#[test]
fn test_parameters_are_optional() {
    let src = r#"{"template-tasks": {}, "templates": {}, "tasks": ["{x}"], "cwd": "/tmp"}"#;
    let config = GlobalConfig::from_json_str(src).unwrap();
    assert_eq!(config.tasks, vec![TaskEntry::from("{x}")]);
}

#[test]
fn test_task_record_field_shapes() {
    let src = r#"{
        "template-tasks": {}, "templates": {}, "cwd": "/tmp",
        "tasks": [
            {"cmd": "a", "pool": false, "user": null, "disabled": "yes"},
            {"cmd": "c", "user": false},
            {"cmd": "b", "pool": "west", "user": "alice", "disabled": true, "match": "b --id"}
        ]
    }"#;
    let config = GlobalConfig::from_json_str(src).unwrap();

    let a = record(&config.tasks[0]);
    assert_eq!(a.pool, None);
    assert_eq!(a.user, None);
    assert!(!a.disabled);

    let c = record(&config.tasks[1]);
    assert_eq!(c.user, Some(TaskUser::NoSwitch));

    let b = record(&config.tasks[2]);
    assert_eq!(b.pool.as_deref(), Some("west"));
    assert_eq!(b.user, Some(TaskUser::named("alice")));
    assert!(b.disabled);
    assert_eq!(b.pattern.as_deref(), Some("b --id"));
}

#[test]
fn test_numeric_pool_rejected() {
    let src = r#"{"template-tasks": {}, "templates": {}, "cwd": "/tmp",
        "tasks": [{"cmd": "a", "pool": 3}]}"#;
    let err = GlobalConfig::from_json_str(src).unwrap_err();
    assert!(matches!(err, StillAliveError::ConfigError(_)));
}

#[test]
fn test_template_tasks_must_be_lists_of_objects() {
    let src = r#"{"template-tasks": {"t": "oops"}, "templates": {}, "cwd": "/tmp", "tasks": []}"#;
    let err = GlobalConfig::from_json_str(src).unwrap_err();
    assert!(err.to_string().contains("template-tasks.t"));
}

#[test]
fn test_expand_produces_one_task_per_instance() {
    let config = expand(GlobalConfig::from_json_str(SAMPLE).unwrap()).unwrap();

    assert!(config.template_tasks.is_empty());
    assert_eq!(config.tasks.len(), 4);

    // Literal tasks come first
    assert_eq!(config.tasks[0], TaskEntry::from("node /srv/bots/web.js"));
    assert_eq!(record(&config.tasks[1]).cmd.as_deref(), Some("./worker.sh"));

    let dev = record(&config.tasks[2]);
    assert_eq!(
        dev.cmd.as_deref(),
        Some("php /srv/bots/irc.php --channel=dev")
    );
    assert_eq!(dev.pattern.as_deref(), Some("irc.php --channel=dev"));
    assert_eq!(dev.pool, None);
    assert!(!dev.disabled);

    let ops = record(&config.tasks[3]);
    assert_eq!(ops.pattern.as_deref(), Some("irc.php --channel=ops"));
    assert_eq!(ops.pool.as_deref(), Some("east"));
    assert!(ops.disabled);
}

#[test]
fn test_expand_preserves_template_order() {
    let src = r#"{
        "cwd": "/tmp", "tasks": [],
        "templates": {"z": {"cmd": "z {n}"}, "a": {"cmd": "a {n}"}},
        "template-tasks": {
            "z": [{"n": "1"}, {"n": "2"}],
            "a": [{"n": "3"}]
        }
    }"#;
    let config = expand(GlobalConfig::from_json_str(src).unwrap()).unwrap();
    let cmds: Vec<_> = config
        .tasks
        .iter()
        .map(|t| record(t).cmd.clone().unwrap())
        .collect();
    assert_eq!(cmds, vec!["z 1", "z 2", "a 3"]);
}

#[test]
fn test_expand_leaves_template_untouched() {
    let config = GlobalConfig::from_json_str(SAMPLE).unwrap();
    let before = config.templates.clone();

    let expanded = expand(config).unwrap();
    assert_eq!(expanded.templates, before);
}

#[test]
fn test_instantiated_tasks_are_independent() {
    let definition = json!({"cmd": "run {id}", "extra": {"nested": "{id}"}});
    let mut first = instantiate("t", 0, &definition, &instance(json!({"id": "1"}))).unwrap();
    let second = instantiate("t", 1, &definition, &instance(json!({"id": "2"}))).unwrap();

    if let TaskEntry::Record(ref mut r) = first {
        r.cmd = Some("changed".to_string());
    }

    assert_eq!(record(&second).cmd.as_deref(), Some("run 2"));
    assert_eq!(definition["cmd"], json!("run {id}"));
}

#[test]
fn test_override_keys_replace_template_values() {
    let definition = json!({"cmd": "base", "cwd": "/a", "user": "root", "pool": "p1"});
    let entry = instantiate(
        "t",
        0,
        &definition,
        &instance(json!({"cmd": "custom", "cwd": "/b", "user": false, "pool": "p2", "note": "x"})),
    )
    .unwrap();

    let r = record(&entry);
    assert_eq!(r.cmd.as_deref(), Some("custom"));
    assert_eq!(r.cwd.as_deref(), Some("/b"));
    assert_eq!(r.user, Some(TaskUser::NoSwitch));
    assert_eq!(r.pool.as_deref(), Some("p2"));
}

#[test]
fn test_null_override_keeps_template_value() {
    let definition = json!({"cmd": "base"});
    let entry = instantiate("t", 0, &definition, &instance(json!({"cmd": null}))).unwrap();
    assert_eq!(record(&entry).cmd.as_deref(), Some("base"));
}

#[test]
fn test_missing_template_uses_overrides_only() {
    let src = r#"{"cwd": "/tmp", "tasks": [], "templates": {},
        "template-tasks": {"ghost": [{"cmd": "echo hi"}, {"name": "x"}]}}"#;
    let config = expand(GlobalConfig::from_json_str(src).unwrap()).unwrap();

    assert_eq!(config.tasks.len(), 2);
    assert_eq!(record(&config.tasks[0]).cmd.as_deref(), Some("echo hi"));
    assert_eq!(record(&config.tasks[1]).cmd, None);
}

#[test]
fn test_string_template_becomes_command() {
    let definition = json!("php {script}");
    let entry = instantiate("t", 0, &definition, &instance(json!({"script": "a.php"}))).unwrap();
    assert_eq!(record(&entry).cmd.as_deref(), Some("php a.php"));
}

#[test]
fn test_non_object_template_rejected() {
    let err = instantiate("t", 0, &json!([1]), &instance(json!({}))).unwrap_err();
    assert!(err.to_string().contains("templates.t"));
}

#[test]
fn test_pretty_json_round_trips_expanded_config() {
    let config = expand(GlobalConfig::from_json_str(SAMPLE).unwrap()).unwrap();
    let dump = config.to_pretty_json().unwrap();

    assert!(dump.contains("\"template-tasks\": {}"));
    assert!(dump.contains("irc.php --channel=ops"));

    let reparsed = GlobalConfig::from_json_str(&dump).unwrap();
    assert_eq!(reparsed.tasks, config.tasks);
}
