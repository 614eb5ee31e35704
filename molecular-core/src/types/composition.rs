//! Composition output: time signature, tempo and the flattened tracks.

use super::note::Note;
use super::time::{beats, to_f64, whole_units, Time};

/// Time signature of a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per measure
    pub numerator: u32,
    /// Beat unit; a measure is divided into this many beat units
    pub denominator: u32,
}

impl TimeSignature {
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Length of one measure in beat units
    pub fn measure_length(&self) -> Time {
        beats(self.denominator as i64)
    }

    /// Index of the measure containing `offset`
    pub fn measure_at(&self, offset: Time) -> u64 {
        whole_units(offset, self.measure_length()).max(0) as u64
    }

    /// Duration of one measure in seconds at `tempo` BPM
    pub fn measure_seconds(&self, tempo: f64) -> f64 {
        self.numerator as f64 / (tempo / 60.0)
    }

    /// Duration of one beat unit in seconds at `tempo` BPM
    pub fn beat_seconds(&self, tempo: f64) -> f64 {
        self.measure_seconds(tempo) / self.denominator as f64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A named, time-ordered list of notes spanning the composition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub name: String,
    pub notes: Vec<Note>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Track {
            name: name.into(),
            notes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// The generated composition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    pub time_signature: TimeSignature,
    /// Tempo in beats per minute
    pub tempo: f64,
    /// Position reached when the last requested pattern closed
    pub total_length: Time,
    pub tracks: Vec<Track>,
}

impl Composition {
    /// Convert a composition time to seconds
    pub fn seconds(&self, t: Time) -> f64 {
        to_f64(t) * self.time_signature.beat_seconds(self.tempo)
    }

    /// Total duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.seconds(self.total_length)
    }

    /// Number of measures touched by the composition
    pub fn measure_count(&self) -> u64 {
        let measure = self.time_signature.measure_length();
        (self.total_length / measure).ceil().to_integer().max(0) as u64
    }

    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    /// All notes across tracks, track by track
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.tracks.iter().flat_map(|t| t.notes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time::time;

    #[test]
    fn test_measure_lengths() {
        let four_four = TimeSignature::FOUR_FOUR;
        assert_eq!(four_four.measure_length(), beats(4));
        assert!((four_four.measure_seconds(120.0) - 2.0).abs() < 1e-9);
        assert!((four_four.beat_seconds(120.0) - 0.5).abs() < 1e-9);

        // A measure always spans `denominator` beat units
        let seven_eight = TimeSignature::new(7, 8);
        assert_eq!(seven_eight.measure_length(), beats(8));
        assert!((seven_eight.measure_seconds(140.0) - 3.0).abs() < 1e-9);
        assert!((seven_eight.beat_seconds(140.0) - 0.375).abs() < 1e-9);
    }

    #[test]
    fn test_measure_at() {
        let sig = TimeSignature::FOUR_FOUR;
        assert_eq!(sig.measure_at(beats(0)), 0);
        assert_eq!(sig.measure_at(time(7, 2)), 0);
        assert_eq!(sig.measure_at(beats(4)), 1);
        assert_eq!(sig.measure_at(beats(49)), 12);
    }

    #[test]
    fn test_composition_seconds() {
        let composition = Composition {
            time_signature: TimeSignature::FOUR_FOUR,
            tempo: 120.0,
            total_length: beats(49),
            tracks: vec![Track::new("melody")],
        };
        assert!((composition.duration_seconds() - 24.5).abs() < 1e-9);
        assert_eq!(composition.measure_count(), 13);
        assert_eq!(composition.note_count(), 0);
    }
}
