//! Command registry for shell commands
//!
//! Provides a clean, extensible pattern for handling shell commands.

pub mod compose;
pub mod general;
pub mod source;

use crate::session::Session;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, nothing to print
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the shell
    Exit,
    /// No registered command matches the input
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a source file for changes
    Watch(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: Session,
}

impl CommandContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "preset")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Source editing
    registry.register("presets", source::cmd_presets);
    registry.register("preset", source::cmd_preset);
    registry.register("load", source::cmd_load);
    registry.register("save", source::cmd_save);
    registry.register("show", source::cmd_show);
    registry.register("set", source::cmd_set);

    // Generation and inspection
    registry.register("generate", compose::cmd_generate);
    registry.register("patterns", compose::cmd_patterns);
    registry.register("tracks", compose::cmd_tracks);
    registry.register("notes", compose::cmd_notes);
    registry.register("ticks", compose::cmd_ticks);
    registry.register("export", compose::cmd_export);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}
