//! Session state shared by shell commands: the current source and the last
//! generated composition.

use anyhow::{anyhow, bail, Context, Result};
use molecular_core::{generate_patterns, Composition, CompositionSource, Generation};
use std::fs;
use std::path::Path;
use tracing::info;

/// Fields editable with `set <field> <value>`
pub const SETTABLE_FIELDS: &[&str] = &[
    "name",
    "description",
    "tempo",
    "timesig",
    "scale",
    "note1",
    "note2",
    "length",
    "amount",
    "lower",
    "upper",
    "unique",
];

/// The working source plus the result of the last generation
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub source: CompositionSource,
    output: Option<(Generation, Composition)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given source
    pub fn with_source(source: CompositionSource) -> Self {
        Session {
            source,
            output: None,
        }
    }

    /// Replace the working source, discarding any previous output
    pub fn set_source(&mut self, source: CompositionSource) {
        self.source = source;
        self.output = None;
    }

    /// Read a source from a JSON file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let source: CompositionSource = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!(path = %path.display(), name = %source.display_name(), "source loaded");
        self.set_source(source);
        Ok(())
    }

    /// Write the current source to a JSON file
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.source)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Write the last composition to a JSON file
    pub fn export_composition<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let composition = self
            .composition()
            .ok_or_else(|| anyhow!("Nothing generated yet. Use 'generate' first"))?;
        let json = serde_json::to_string_pretty(composition)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "composition exported");
        Ok(())
    }

    /// Run the engine on the current source
    pub fn generate(&mut self) -> Result<&Composition> {
        let generation = generate_patterns(&self.source)
            .with_context(|| format!("Cannot generate '{}'", self.source.display_name()))?;
        let composition = generation.to_composition();
        info!(
            name = %self.source.display_name(),
            patterns = generation.patterns.len(),
            notes = composition.note_count(),
            seconds = composition.duration_seconds(),
            "composition generated"
        );
        let (_, composition) = self.output.insert((generation, composition));
        Ok(&*composition)
    }

    pub fn generation(&self) -> Option<&Generation> {
        self.output.as_ref().map(|(generation, _)| generation)
    }

    pub fn composition(&self) -> Option<&Composition> {
        self.output.as_ref().map(|(_, composition)| composition)
    }

    /// Change one field of the source from its textual value
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            bail!("Missing value for '{}'", field);
        }
        let mut source = self.source.clone();
        match field.to_lowercase().as_str() {
            "name" => source.name = value.to_string(),
            "description" => source.description = value.to_string(),
            "tempo" => source.tempo = parse_number(field, value)?,
            "timesig" => {
                let (numerator, denominator) = value
                    .split_once('/')
                    .ok_or_else(|| anyhow!("Time signature must look like 4/4, got '{}'", value))?;
                source.time_sig_beat_amount = parse_number(field, numerator.trim())?;
                source.time_sig_beat_unit = parse_number(field, denominator.trim())?;
            }
            "scale" => source.scale = CompositionSource::parse_scale(value),
            "note1" => source.note1_length = parse_number(field, value)?,
            "note2" => source.note2_length = parse_number(field, value)?,
            "length" => source.pattern_length = parse_number(field, value)?,
            "amount" => source.pattern_amount = parse_number(field, value)?,
            "lower" => source.octave_lower = parse_number(field, value)?,
            "upper" => source.octave_upper = parse_number(field, value)?,
            "unique" => source.unique_track_per_pattern = parse_switch(value)?,
            other => bail!(
                "Unknown field '{}'. Fields: {}",
                other,
                SETTABLE_FIELDS.join(", ")
            ),
        }
        self.set_source(source);
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("Invalid value for '{}': '{}'", field, value))
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(anyhow!("Expected on/off, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_fields() {
        let mut session = Session::new();
        session.set_field("tempo", "96").unwrap();
        session.set_field("timesig", "7/8").unwrap();
        session.set_field("scale", "F, G#, E").unwrap();
        session.set_field("note2", "3.5").unwrap();
        session.set_field("unique", "on").unwrap();

        assert_eq!(session.source.tempo, 96.0);
        assert_eq!(session.source.time_sig_beat_amount, 7);
        assert_eq!(session.source.time_sig_beat_unit, 8);
        assert_eq!(session.source.scale, vec!["F", "G#", "E"]);
        assert_eq!(session.source.note2_length, 3.5);
        assert!(session.source.unique_track_per_pattern);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut session = Session::new();
        assert!(session.set_field("tempo", "fast").is_err());
        assert!(session.set_field("timesig", "4").is_err());
        assert!(session.set_field("amount", "-2").is_err());
        assert!(session.set_field("unique", "maybe").is_err());
        assert!(session.set_field("colour", "red").is_err());
        assert!(session.set_field("name", "  ").is_err());
        // Failed edits leave the source untouched
        assert_eq!(session.source, CompositionSource::default());
    }

    #[test]
    fn test_generate_stores_output() {
        let mut session = Session::new();
        assert!(session.composition().is_none());
        session.generate().unwrap();
        assert_eq!(session.generation().unwrap().patterns.len(), 8);
        assert!(session.composition().unwrap().note_count() > 0);

        // Editing the source invalidates the previous output
        session.set_field("amount", "2").unwrap();
        assert!(session.composition().is_none());
    }

    #[test]
    fn test_generate_reports_invalid_source() {
        let mut session = Session::new();
        session.set_field("lower", "7").unwrap();
        let err = session.generate().unwrap_err();
        assert!(format!("{:#}", err).contains("octave"));
        assert!(session.composition().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.json");

        let mut session = Session::new();
        session.set_field("name", "Roundtrip").unwrap();
        session.set_field("note1", "9").unwrap();
        session.save_file(&path).unwrap();

        let mut other = Session::new();
        other.load_file(&path).unwrap();
        assert_eq!(other.source, session.source);
    }

    #[test]
    fn test_export_requires_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("composition.json");

        let mut session = Session::new();
        assert!(session.export_composition(&path).is_err());
        session.generate().unwrap();
        session.export_composition(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"tracks\""));
    }
}
