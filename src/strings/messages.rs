//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error notices, status reports and command confirmations.

use crate::domain::types::ModelInfo;

pub const AUTH_DENIED: &str = "🚫 This command can be used only by admin users.";
pub const OFFLINE_IGNORED: &str = "I'm offline, this message is ignored";
pub const NOW_ONLINE: &str = "I'm online";
pub const NOW_OFFLINE: &str = "I'm offline";
pub const HISTORY_CLEARED: &str = "🧹 History cleared.";
pub const REPLY_HAS_IMAGES: &str = "The reply contained images, which cannot be displayed here.";
pub const INVALID_ARGUMENTS: &str = "Error: invalid arguments! Usage: `!model [name]`";

pub fn command_not_found(token: &str) -> String {
    format!("Command not found: {token}")
}

pub fn unknown_attachment_type(media_type: &str) -> String {
    format!("Unknown attachment type: {media_type}")
}

pub fn attachment_fetch_failed(description: &str, err: &str) -> String {
    format!("⚠️ Could not download attachment {description}: {err}")
}

pub fn new_model(name: &str) -> String {
    format!("New model is _{name}_")
}

pub fn unknown_model(name: &str) -> String {
    format!("Unknown model _{name}_")
}

pub fn status_report(
    enabled: bool,
    model: &str,
    status: &str,
    since: &str,
    running: &[ModelInfo],
) -> String {
    let mut out = if enabled {
        format!("I'm online and using _{model}_\n")
    } else {
        format!("I'm offline and using _{model}_\n")
    };
    out.push_str(&format!("My status is: {status}\n"));
    out.push_str(&format!("Up since {since}\n"));
    if running.is_empty() {
        out.push_str("No models are running.\n");
    } else {
        out.push_str("Running models:\n");
        for m in running {
            out.push_str(&format!("- {} ({:.2}GB)\n", m.name, m.size_gb()));
        }
    }
    out
}

pub fn available_models(models: &[ModelInfo], current: &str) -> String {
    let mut out = String::from("Available models are:\n");
    for m in models {
        out.push_str(&format!("- {}\n", m.name));
    }
    out.push_str(&format!("\ncurrent model: *{current}*\n"));
    out
}

pub fn help(commands: &[(&str, &str)]) -> String {
    let mut out = String::from("Available commands:\n");
    for (key, description) in commands {
        out.push_str(&format!("- `{key}`: {description}\n"));
    }
    out
}
