//! General shell commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use crate::session::SETTABLE_FIELDS;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(help_text())
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch <file>` command
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <source.json>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

fn help_text() -> String {
    let entry = |command: &str, description: &str| format!("  {:<28} - {}\n", command.cyan(), description);

    let mut out = format!("{}\n", "🎵 Molecular Music Generator Help".bold());
    out.push_str(&format!("{}\n\n", "=================================".bold()));

    out.push_str(&format!("{}\n", "Source:".green()));
    out.push_str(&entry("presets", "List built-in presets"));
    out.push_str(&entry("preset <name>", "Use a built-in preset"));
    out.push_str(&entry("load <file.json>", "Read a source from JSON"));
    out.push_str(&entry("save <file.json>", "Write the current source to JSON"));
    out.push_str(&entry("show", "Show the current source"));
    out.push_str(&entry("set <field> <value>", "Change a source field"));
    out.push_str(&format!("    fields: {}\n\n", SETTABLE_FIELDS.join(", ").dimmed()));

    out.push_str(&format!("{}\n", "Composition:".green()));
    out.push_str(&entry("generate", "Generate from the current source"));
    out.push_str(&entry("patterns", "List the generated patterns"));
    out.push_str(&entry("tracks", "List output tracks"));
    out.push_str(&entry("notes [track] [limit]", "List notes of a track"));
    out.push_str(&entry("ticks [track] [limit]", "List MIDI tick events of a track"));
    out.push_str(&entry("export <file.json>", "Write the composition to JSON"));
    out.push('\n');

    out.push_str(&format!("{}\n", "Other:".green()));
    out.push_str(&entry("watch <file.json>", "Regenerate whenever the file changes"));
    out.push_str(&entry("help", "Show this help"));
    out.push_str(&format!("  {:<28} - Exit the shell", "quit".bright_red()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_watch_requires_path() {
        let mut ctx = CommandContext::new(Session::new());
        assert!(matches!(cmd_watch("", &mut ctx), CommandResult::Error(_)));
        assert_eq!(
            cmd_watch("song.json", &mut ctx),
            CommandResult::Watch("song.json".to_string())
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let mut ctx = CommandContext::new(Session::new());
        match cmd_help("", &mut ctx) {
            CommandResult::Message(text) => {
                for command in ["generate", "patterns", "ticks", "watch", "timesig"] {
                    assert!(text.contains(command), "help is missing {}", command);
                }
            }
            other => panic!("Expected help text, got {:?}", other),
        }
    }
}
