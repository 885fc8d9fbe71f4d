//! Launch command construction.

/// Appended so the shell returns without waiting for the task.
pub const BACKGROUND_SUFFIX: &str = " &";

/// Prepended so the task ignores the hangup sent when the session ends.
pub const DETACH_PREFIX: &str = "nohup ";

/// The `sudo` prefix that runs a command as `user`.
///
/// The user name is shell-quoted, so names with spaces or quotes stay a
/// single argument.
pub fn user_prefix(user: &str) -> String {
    format!("sudo -u {} ", shell_words::quote(user))
}

/// Build the shell line that launches a task.
///
/// Idempotent: a command that already carries the background suffix, the
/// detach prefix, or the user prefix is not wrapped again.
///
/// ```ignore
/// assert_eq!(build_command("worker.sh", None), "nohup worker.sh &");
/// assert_eq!(build_command("nohup worker.sh &", None), "nohup worker.sh &");
/// ```
pub fn build_command(raw: &str, user: Option<&str>) -> String {
    let prefix = user.map(user_prefix);

    let mut body = raw.trim();
    if let Some(prefix) = &prefix {
        body = body.strip_prefix(prefix.as_str()).unwrap_or(body);
    }

    let mut command = body.to_string();
    if !command.ends_with(BACKGROUND_SUFFIX) {
        command.push_str(BACKGROUND_SUFFIX);
    }
    if !command.starts_with(DETACH_PREFIX) {
        command.insert_str(0, DETACH_PREFIX);
    }

    match prefix {
        Some(prefix) => prefix + &command,
        None => command,
    }
}
