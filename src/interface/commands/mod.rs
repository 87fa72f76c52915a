//! # Command Handlers
//!
//! Contains the handlers for each built-in command (`!status`, `!model`, ...) and the
//! registration table the Router dispatches through.

pub mod admin;
pub mod help;
pub mod misc;
pub mod model;

use crate::application::registry::CommandRegistry;
use std::sync::Arc;

/// Builds the registry of built-in commands, in help-listing order.
pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("status", "Show status of the bot", false, Arc::new(misc::Status));
    registry.register("enable", "Put the bot online", true, Arc::new(admin::Enable));
    registry.register("disable", "Put the bot offline", true, Arc::new(admin::Disable));
    registry.register("retry", "Ask to regenerate a new answer", false, Arc::new(misc::Retry));
    registry.register("help", "Print available commands", false, Arc::new(help::Help));
    registry.register("clear", "Clear history", false, Arc::new(misc::Clear));
    registry.register("model", "List or change the current model", true, Arc::new(model::Model));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_privileges() {
        let registry = registry();
        assert_eq!(registry.len(), 7);
        for (key, admin) in [
            ("!status", false),
            ("!enable", true),
            ("!disable", true),
            ("!retry", false),
            ("!help", false),
            ("!clear", false),
            ("!model", true),
        ] {
            let entry = registry.entry(key).unwrap();
            assert_eq!(entry.requires_admin, admin, "{key}");
            assert_eq!(entry.description.ends_with("_(admin only)_"), admin, "{key}");
        }
    }
}
