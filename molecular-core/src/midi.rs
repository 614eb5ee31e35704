//! Tick conversion for MIDI file writers.
//!
//! Produces per-track tempo/time signature metadata and
//! (pitch, start tick, duration ticks) triplets. Byte-level encoding is left
//! to the file writer.

use crate::types::time::Time;
use crate::types::{Composition, Note, TimeSignature, Track};
use anyhow::{anyhow, Result};
use num_rational::Ratio;

/// Tick resolution: ticks per quarter note at the composition tempo
pub const TICKS_PER_QUARTER: i64 = 128;

/// One note event on the MIDI tick grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiNoteEvent {
    /// MIDI note number (0-127)
    pub pitch: u8,
    pub start_tick: u64,
    /// Always at least one tick
    pub duration_ticks: u64,
}

/// A track ready for a MIDI writer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiTrack {
    pub name: String,
    pub tempo: f64,
    pub time_signature: TimeSignature,
    pub events: Vec<MidiNoteEvent>,
}

/// Convert a composition time to ticks.
///
/// Equivalent to `round(seconds * ticksPerSecond)` with
/// ticksPerSecond = 128 * tempo / 60, evaluated exactly: the tempo cancels out.
pub fn ticks(t: Time, time_signature: TimeSignature) -> u64 {
    let scale = Ratio::new(
        TICKS_PER_QUARTER * time_signature.numerator as i64,
        time_signature.denominator as i64,
    );
    (t * scale).round().to_integer().max(0) as u64
}

/// Convert a single note to a tick event
pub fn note_event(note: &Note, time_signature: TimeSignature) -> Result<MidiNoteEvent> {
    let pitch = note
        .midi_number()
        .ok_or_else(|| anyhow!("Note {}{} is outside the MIDI range", note.pitch(), note.octave()))?;
    Ok(MidiNoteEvent {
        pitch,
        start_tick: ticks(note.offset(), time_signature),
        duration_ticks: ticks(note.duration(), time_signature).max(1),
    })
}

fn midi_track(track: &Track, composition: &Composition) -> Result<MidiTrack> {
    let events = track
        .notes
        .iter()
        .map(|note| note_event(note, composition.time_signature))
        .collect::<Result<Vec<_>>>()?;
    Ok(MidiTrack {
        name: track.name.clone(),
        tempo: composition.tempo,
        time_signature: composition.time_signature,
        events,
    })
}

/// Convert every track of a composition
pub fn to_midi_tracks(composition: &Composition) -> Result<Vec<MidiTrack>> {
    composition
        .tracks
        .iter()
        .map(|track| midi_track(track, composition))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time::{beats, time};

    #[test]
    fn test_ticks_in_four_four() {
        let sig = TimeSignature::FOUR_FOUR;
        assert_eq!(ticks(beats(0), sig), 0);
        assert_eq!(ticks(beats(1), sig), 128);
        assert_eq!(ticks(beats(4), sig), 512);
        assert_eq!(ticks(time(1, 2), sig), 64);
    }

    #[test]
    fn test_ticks_follow_measure_seconds() {
        // 7/8 at 140 BPM: a measure is 3s, 7 quarters long at 128 ticks each
        let sig = TimeSignature::new(7, 8);
        assert_eq!(ticks(sig.measure_length(), sig), 7 * 128);
        let seconds: f64 = 3.0;
        let ticks_per_second: f64 = 128.0 * 140.0 / 60.0;
        assert_eq!(
            ticks(sig.measure_length(), sig),
            (seconds * ticks_per_second).round() as u64
        );
    }

    #[test]
    fn test_note_event_clamps_duration() {
        let note = Note::new("A".parse().unwrap(), 4, beats(2), time(1, 1000), 0);
        let event = note_event(&note, TimeSignature::FOUR_FOUR).unwrap();
        assert_eq!(event.pitch, 69);
        assert_eq!(event.start_tick, 256);
        assert_eq!(event.duration_ticks, 1);
    }

    #[test]
    fn test_out_of_range_pitch_fails() {
        let note = Note::new("C".parse().unwrap(), 10, beats(0), beats(1), 0);
        let err = note_event(&note, TimeSignature::FOUR_FOUR).unwrap_err();
        assert!(err.to_string().contains("C10"));
    }

    #[test]
    fn test_tracks_carry_metadata() {
        let mut track = Track::new("melody");
        track
            .notes
            .push(Note::new("E".parse().unwrap(), 2, beats(0), beats(4), 0));
        let composition = Composition {
            time_signature: TimeSignature::FOUR_FOUR,
            tempo: 120.0,
            total_length: beats(4),
            tracks: vec![track],
        };
        let tracks = to_midi_tracks(&composition).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "melody");
        assert_eq!(tracks[0].tempo, 120.0);
        assert_eq!(
            tracks[0].events,
            vec![MidiNoteEvent {
                pitch: 40,
                start_tick: 0,
                duration_ticks: 512
            }]
        );
    }
}
