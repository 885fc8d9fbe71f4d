//! Launching tasks.
//!
//! [`build_command`] turns a task command into a detached, backgrounded
//! shell line; a [`Spawner`] runs it.

mod builder;
mod spawner;

pub use builder::build_command;
pub use spawner::{ShellSpawner, Spawner};
