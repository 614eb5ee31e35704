//! Built-in composition presets.

use crate::types::CompositionSource;

/// The default source: ascending the C minor scale
pub fn default_source() -> CompositionSource {
    CompositionSource {
        name: "Default".to_string(),
        description: "Something to set the mood. Ascending the C minor scale.".to_string(),
        time_sig_beat_amount: 4,
        time_sig_beat_unit: 4,
        tempo: 120.0,
        scale: CompositionSource::parse_scale("C,D,D#,F,G,G#,A#"),
        note1_length: 2.0,
        note2_length: 0.5,
        pattern_length: 16.0,
        pattern_amount: 8,
        octave_lower: 2,
        octave_upper: 7,
        unique_track_per_pattern: false,
    }
}

fn variant(name: &str, description: &str, scale: &str, note1: f64, note2: f64) -> CompositionSource {
    CompositionSource {
        name: name.to_string(),
        description: description.to_string(),
        scale: CompositionSource::parse_scale(scale),
        note1_length: note1,
        note2_length: note2,
        ..default_source()
    }
}

/// All built-in presets, default first
pub fn presets() -> Vec<CompositionSource> {
    vec![
        default_source(),
        CompositionSource {
            time_sig_beat_amount: 3,
            tempo: 136.0,
            pattern_length: 6.0,
            pattern_amount: 16,
            octave_lower: 3,
            octave_upper: 6,
            ..variant(
                "4F1",
                "Waltz in the \"saddest of keys\", starting on F.",
                "F,G,A,Bb,C,D,E",
                4.0,
                1.0,
            )
        },
        variant(
            "4E3",
            "By Duncan Lockerby, as explained in his video. C major starting on E.",
            "E,F,G,A,B,C,D",
            4.0,
            3.0,
        ),
        variant(
            "10 G 3.5",
            "By Duncan Lockerby. A slow piece in C major, starting on G.",
            "G,A,B,C,D,E,F",
            10.0,
            3.5,
        ),
        CompositionSource {
            tempo: 220.0,
            ..variant("9 C 14.5", "By Duncan Lockerby", "C,D,E,F,G,A,B", 9.0, 14.5)
        },
        CompositionSource {
            tempo: 240.0,
            ..variant(
                "11.5 B 4",
                "By Duncan Lockerby. C major starting on B.",
                "B,C,D,E,F,G,A",
                11.5,
                4.0,
            )
        },
        CompositionSource {
            tempo: 110.0,
            pattern_length: 4.0,
            ..variant(
                "0.5 C 3",
                "A frenetic piece, using a shuffled list of intervals in C Romanian / Ukranian Dorian",
                "A#,F#,D#,G,A,D,C",
                0.5,
                3.0,
            )
        },
        CompositionSource {
            tempo: 96.0,
            pattern_length: 8.0,
            pattern_amount: 18,
            ..variant(
                "Enigmatic scale",
                "Each pattern was played through a separate Commodore 64.",
                "C,C#,G#,E,F#,B,G#",
                1.5,
                4.0,
            )
        },
        CompositionSource {
            tempo: 140.0,
            time_sig_beat_amount: 7,
            time_sig_beat_unit: 8,
            pattern_length: 14.0,
            pattern_amount: 32,
            ..variant(
                "Sand Prince",
                "A brooding piece based around E phrygian dominant in 7/8 time.",
                "F,G#,E,A,B,D,C",
                3.0,
                4.0,
            )
        },
        CompositionSource {
            time_sig_beat_amount: 5,
            time_sig_beat_unit: 8,
            tempo: 165.0,
            pattern_length: 8.0,
            pattern_amount: 16,
            ..variant(
                "Diminished scale in 5/8",
                "Each pattern was processed by a separate noise synth.",
                "E,F,G,G#,A#,B,C#,D",
                6.0,
                1.0,
            )
        },
    ]
}

/// Look up a preset by name, ignoring case
pub fn preset(name: &str) -> Option<CompositionSource> {
    let wanted = name.trim().to_lowercase();
    presets()
        .into_iter()
        .find(|p| p.name.to_lowercase() == wanted)
}
