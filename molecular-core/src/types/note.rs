//! A single placed note of a composition.

use super::pitch::PitchName;
use super::time::{to_f64, Time};
use std::fmt;

/// A note placed on the composition timeline.
///
/// Offsets and durations are in beat units (see [`crate::types::time`]).
/// Notes are immutable once created; tiling produces shifted copies via
/// [`Note::shifted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pitch: PitchName,
    octave: i32,
    offset: Time,
    duration: Time,
    measure: u64,
}

impl Note {
    pub fn new(pitch: PitchName, octave: i32, offset: Time, duration: Time, measure: u64) -> Self {
        Note {
            pitch,
            octave,
            offset,
            duration,
            measure,
        }
    }

    pub fn pitch(&self) -> PitchName {
        self.pitch
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Offset from the composition start
    pub fn offset(&self) -> Time {
        self.offset
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    /// Index of the measure this note starts in
    pub fn measure(&self) -> u64 {
        self.measure
    }

    /// Offset at which this note stops sounding
    pub fn end(&self) -> Time {
        self.offset + self.duration
    }

    /// Frequency in Hz for audio collaborators
    pub fn frequency(&self) -> f64 {
        self.pitch.frequency(self.octave)
    }

    /// MIDI note number, if within range
    pub fn midi_number(&self) -> Option<u8> {
        self.pitch.midi_number(self.octave)
    }

    /// Copy of this note moved to `offset`, with the measure recomputed
    pub fn shifted(&self, offset: Time, measure: u64) -> Note {
        Note {
            offset,
            measure,
            ..*self
        }
    }

    /// Two notes overlap when they sound the same pitch at the same position.
    /// Duration is ignored.
    pub fn overlaps(&self, other: &Note) -> bool {
        self.pitch == other.pitch
            && self.octave == other.octave
            && self.offset == other.offset
            && self.measure == other.measure
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} @ {:.3} (+{:.3}) m{}",
            self.pitch,
            self.octave,
            to_f64(self.offset),
            to_f64(self.duration),
            self.measure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time::{beats, time};

    fn note(name: &str, octave: i32, offset: Time, duration: Time) -> Note {
        Note::new(name.parse().unwrap(), octave, offset, duration, 0)
    }

    #[test]
    fn test_note_geometry() {
        let n = note("E", 2, beats(4), time(3, 2));
        assert_eq!(n.end(), time(11, 2));
    }

    #[test]
    fn test_overlap_ignores_duration() {
        let a = note("E", 2, beats(4), beats(3));
        let b = note("E", 2, beats(4), beats(4));
        assert!(a.overlaps(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_overlap_requires_same_pitch_octave_and_offset() {
        let a = note("E", 2, beats(4), beats(3));
        assert!(!a.overlaps(&note("F", 2, beats(4), beats(3))));
        assert!(!a.overlaps(&note("E", 3, beats(4), beats(3))));
        assert!(!a.overlaps(&note("E", 2, beats(5), beats(3))));
    }

    #[test]
    fn test_shifted_keeps_pitch_and_duration() {
        let a = note("G", 3, beats(4), beats(3));
        let moved = a.shifted(beats(10), 2);
        assert_eq!(moved.offset(), beats(10));
        assert_eq!(moved.measure(), 2);
        assert_eq!(moved.duration(), beats(3));
        assert_eq!(moved.pitch(), a.pitch());
        assert_eq!(moved.octave(), 3);
    }

    #[test]
    fn test_display() {
        let n = note("Bb", 3, time(1, 2), beats(2));
        assert_eq!(n.to_string(), "Bb3 @ 0.500 (+2.000) m0");
    }
}
