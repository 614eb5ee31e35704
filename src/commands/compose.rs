//! Composition commands: generate, inspect and export

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use molecular_core::midi::to_midi_tracks;
use molecular_core::types::time::to_f64;
use molecular_core::{Composition, Track};

const DEFAULT_LIMIT: usize = 32;

/// Handle `generate` command
pub fn cmd_generate(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.generate() {
        Ok(composition) => CommandResult::Message(summary(composition)),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `patterns` command
pub fn cmd_patterns(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(generation) = ctx.session.generation() else {
        return not_generated();
    };
    let lines: Vec<String> = generation
        .patterns
        .iter()
        .map(|pattern| format!("  {}", pattern))
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `tracks` command
pub fn cmd_tracks(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(composition) = ctx.session.composition() else {
        return not_generated();
    };
    let lines: Vec<String> = composition
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            format!(
                "  {:>2}. {:<12} {} notes",
                i + 1,
                track.name.cyan(),
                track.len()
            )
        })
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `notes [track] [limit]` command
pub fn cmd_notes(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(composition) = ctx.session.composition() else {
        return not_generated();
    };
    let (track, limit) = match select_track(composition, args) {
        Ok(selection) => selection,
        Err(e) => return CommandResult::Error(e),
    };

    let mut output = format!("{} ({} notes)\n", track.name.bold(), track.len());
    for note in track.notes.iter().take(limit) {
        output.push_str(&format!(
            "  {}  {:>8.3}s\n",
            note,
            composition.seconds(note.offset())
        ));
    }
    if track.len() > limit {
        output.push_str(&format!("  {}", format!("… {} more", track.len() - limit).dimmed()));
    }
    CommandResult::Message(output.trim_end().to_string())
}

/// Handle `ticks [track] [limit]` command
pub fn cmd_ticks(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(composition) = ctx.session.composition() else {
        return not_generated();
    };
    let (track, limit) = match select_track(composition, args) {
        Ok(selection) => selection,
        Err(e) => return CommandResult::Error(e),
    };
    let midi_tracks = match to_midi_tracks(composition) {
        Ok(tracks) => tracks,
        Err(e) => return CommandResult::Error(format!("{:#}", e)),
    };
    let Some(midi) = midi_tracks.iter().find(|m| m.name == track.name) else {
        return CommandResult::Error(format!("No MIDI data for track '{}'", track.name));
    };

    let mut output = format!(
        "{} {} BPM, {}\n",
        midi.name.bold(),
        midi.tempo,
        midi.time_signature
    );
    output.push_str(&format!(
        "  {:>5} {:>8} {:>8}\n",
        "pitch".dimmed(),
        "start".dimmed(),
        "length".dimmed()
    ));
    for event in midi.events.iter().take(limit) {
        output.push_str(&format!(
            "  {:>5} {:>8} {:>8}\n",
            event.pitch, event.start_tick, event.duration_ticks
        ));
    }
    if midi.events.len() > limit {
        output.push_str(&format!(
            "  {}",
            format!("… {} more", midi.events.len() - limit).dimmed()
        ));
    }
    CommandResult::Message(output.trim_end().to_string())
}

/// Handle `export <file>` command
pub fn cmd_export(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: export <composition.json>".to_string());
    }
    match ctx.session.export_composition(args) {
        Ok(()) => CommandResult::Message(format!("💾 Exported composition to {}", args.green())),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// One-paragraph description of a composition
pub fn summary(composition: &Composition) -> String {
    format!(
        "🎶 {} tracks, {} notes, {} measures of {} at {} BPM ({:.2} beats, {:.2}s)",
        composition.tracks.len().to_string().green(),
        composition.note_count().to_string().green(),
        composition.measure_count(),
        composition.time_signature,
        composition.tempo,
        to_f64(composition.total_length),
        composition.duration_seconds()
    )
}

fn not_generated() -> CommandResult {
    CommandResult::Error("Nothing generated yet. Use 'generate' first".to_string())
}

/// Parse `[track] [limit]`: a 1-based track number and a note limit
fn select_track<'a>(
    composition: &'a Composition,
    args: &str,
) -> Result<(&'a Track, usize), String> {
    let mut parts = args.split_whitespace();
    let number = match parts.next() {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| format!("Invalid track number '{}'", n))?,
        None => 1,
    };
    let limit = match parts.next() {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| format!("Invalid limit '{}'", n))?,
        None => DEFAULT_LIMIT,
    };
    let track = number
        .checked_sub(1)
        .and_then(|i| composition.tracks.get(i))
        .ok_or_else(|| {
            format!(
                "No track {}. The composition has {} track(s)",
                number,
                composition.tracks.len()
            )
        })?;
    Ok((track, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use molecular_core::presets;

    fn generated(preset: &str) -> CommandContext {
        let source = presets::preset(preset).unwrap();
        let mut ctx = CommandContext::new(Session::with_source(source));
        assert!(matches!(cmd_generate("", &mut ctx), CommandResult::Message(_)));
        ctx
    }

    #[test]
    fn test_inspection_requires_generation() {
        let mut ctx = CommandContext::new(Session::new());
        for cmd in [cmd_patterns, cmd_tracks, cmd_notes, cmd_ticks] {
            assert!(matches!(cmd("", &mut ctx), CommandResult::Error(_)));
        }
    }

    #[test]
    fn test_patterns_lists_each_pattern() {
        let mut ctx = generated("4E3");
        match cmd_patterns("", &mut ctx) {
            CommandResult::Message(text) => assert_eq!(text.lines().count(), 8),
            other => panic!("Expected pattern list, got {:?}", other),
        }
    }

    #[test]
    fn test_notes_respects_limit() {
        let mut ctx = generated("4E3");
        match cmd_notes("1 3", &mut ctx) {
            CommandResult::Message(text) => {
                assert!(text.starts_with(&format!("{}", "melody".bold())));
                // header, three notes and the "more" line
                assert_eq!(text.lines().count(), 5);
            }
            other => panic!("Expected notes, got {:?}", other),
        }
    }

    #[test]
    fn test_track_selection_errors() {
        let mut ctx = generated("4E3");
        assert!(matches!(cmd_notes("2", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_notes("0", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_ticks("one", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_ticks("1 many", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_ticks_for_unique_tracks() {
        let mut ctx = generated("4E3");
        ctx.session.set_field("unique", "on").unwrap();
        assert!(matches!(cmd_generate("", &mut ctx), CommandResult::Message(_)));
        match cmd_ticks("8", &mut ctx) {
            CommandResult::Message(text) => assert!(text.contains("pattern 8")),
            other => panic!("Expected ticks, got {:?}", other),
        }
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut ctx = generated("Default");
        let result = cmd_export(path.to_str().unwrap(), &mut ctx);
        assert!(matches!(result, CommandResult::Message(_)));
        assert!(path.exists());
        assert!(matches!(cmd_export("", &mut ctx), CommandResult::Error(_)));
    }
}
