//! Configuration for stillalive.
//!
//! The config file is a JSON document (comment lines allowed) describing
//! literal tasks, reusable templates, and per-template instances. Loading
//! runs the global `parameters` substitution; [`expand`] then turns every
//! template instance into a literal task entry.

mod expand;
mod loader;
mod model;
pub mod placeholder;

#[cfg(test)]
mod tests;

// Re-export public API
pub use expand::{OVERRIDE_KEYS, expand, instantiate};
pub use loader::{DEFAULT_CONFIG_FILE, REQUIRED_KEYS, parse_document, strip_comments};
pub use model::{GlobalConfig, TaskEntry, TaskRecord, TaskUser, TemplateInstance, TemplateTasks};
