//! Source commands: presets, loading, saving and editing the CompositionSource

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use molecular_core::presets;

/// Handle `presets` command
pub fn cmd_presets(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let mut output = format!("{}\n", "🎼 Presets:".bold());
    for (i, preset) in presets::presets().iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<24} {}\n",
            i + 1,
            preset.name.cyan(),
            preset.description.dimmed()
        ));
    }
    output.push_str(&format!("\n{} {}", "Use".dimmed(), "preset <name>".green()));
    CommandResult::Message(output)
}

/// Handle `preset <name|number>` command
pub fn cmd_preset(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: preset <name|number>".to_string());
    }

    let found = match args.parse::<usize>() {
        Ok(n) if n >= 1 => presets::presets().into_iter().nth(n - 1),
        _ => presets::preset(args),
    };

    match found {
        Some(source) => {
            let name = source.display_name();
            ctx.session.set_source(source);
            CommandResult::Message(format!("🎼 Using preset {}", name.green()))
        }
        None => CommandResult::Error(format!(
            "Unknown preset '{}'. Use 'presets' to list them",
            args
        )),
    }
}

/// Handle `load <file>` command
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: load <source.json>".to_string());
    }
    match ctx.session.load_file(args) {
        Ok(()) => CommandResult::Message(format!(
            "📂 Loaded {}",
            ctx.session.source.display_name().green()
        )),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `save <file>` command
pub fn cmd_save(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: save <source.json>".to_string());
    }
    match ctx.session.save_file(args) {
        Ok(()) => CommandResult::Message(format!("💾 Saved source to {}", args.green())),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `show` command
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let source = &ctx.session.source;
    let row = |label: &str, value: String| format!("  {:<16} {}\n", label.dimmed(), value);

    let mut output = format!("{}\n", source.display_name().bold());
    if !source.description.is_empty() {
        output.push_str(&format!("  {}\n", source.description.italic()));
    }
    output.push_str(&row("time signature", source.time_signature().to_string()));
    output.push_str(&row("tempo", format!("{} BPM", source.tempo)));
    output.push_str(&row("scale", source.scale.join(", ").cyan().to_string()));
    output.push_str(&row(
        "note lengths",
        format!("{} / {}", source.note1_length, source.note2_length),
    ));
    output.push_str(&row("pattern length", source.pattern_length.to_string()));
    output.push_str(&row("pattern amount", source.pattern_amount.to_string()));
    output.push_str(&row(
        "octaves",
        format!("{} - {}", source.octave_lower, source.octave_upper),
    ));
    output.push_str(&row(
        "tracks",
        if source.unique_track_per_pattern {
            "one per pattern".to_string()
        } else {
            "merged".to_string()
        },
    ));
    CommandResult::Message(output.trim_end().to_string())
}

/// Handle `set <field> <value>` command
pub fn cmd_set(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some((field, value)) = args.split_once(' ') else {
        return CommandResult::Error("Usage: set <field> <value>".to_string());
    };
    match ctx.session.set_field(field, value) {
        Ok(()) => CommandResult::Message(format!("✏️  {} = {}", field.green(), value.trim())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn ctx() -> CommandContext {
        CommandContext::new(Session::new())
    }

    #[test]
    fn test_preset_by_name_and_number() {
        let mut ctx = ctx();
        assert!(matches!(cmd_preset("4E3", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.source.name, "4E3");

        assert!(matches!(cmd_preset("2", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.source.name, "4F1");

        assert!(matches!(cmd_preset("0", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_preset("missing", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_preset("", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_set_command() {
        let mut ctx = ctx();
        assert!(matches!(cmd_set("scale E, F, G", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.source.scale, vec!["E", "F", "G"]);

        assert!(matches!(cmd_set("tempo", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_set("tempo abc", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_show_mentions_fields() {
        let mut ctx = ctx();
        match cmd_show("", &mut ctx) {
            CommandResult::Message(text) => {
                assert!(text.contains("Default"));
                assert!(text.contains("4/4"));
                assert!(text.contains("120 BPM"));
            }
            other => panic!("Expected source listing, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let mut ctx = ctx();
        assert!(matches!(
            cmd_load("/definitely/not/here.json", &mut ctx),
            CommandResult::Error(_)
        ));
    }
}
