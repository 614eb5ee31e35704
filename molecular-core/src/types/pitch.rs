use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// A pitch name within the octave, using chromatic representation (0-11)
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
///
/// The accidental spelling of the scale entry is kept so a scale written
/// with flats displays with flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct PitchName {
    pitch_class: u8,
    accidental: Accidental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Accidental {
    Sharp,
    Flat,
    Natural,
}

/// Standard 12-tone equal temperament frequencies for the 4th octave (C4-B4)
/// Based on A4 = 440Hz standard tuning
const BASE_OCTAVE_FREQUENCIES: [f64; 12] = [
    261.626, // C4
    277.183, // C#4/Db4
    293.665, // D4
    311.127, // D#4/Eb4
    329.628, // E4
    349.228, // F4
    369.994, // F#4/Gb4
    391.995, // G4
    415.305, // G#4/Ab4
    440.000, // A4
    466.164, // A#4/Bb4
    493.883, // B4
];

impl PitchName {
    /// Get the chromatic pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// Frequency in Hz of this pitch at the given octave
    pub fn frequency(&self, octave: i32) -> f64 {
        let base_freq = BASE_OCTAVE_FREQUENCIES[self.pitch_class as usize];
        base_freq * 2.0_f64.powi(octave - 4)
    }

    /// MIDI note number of this pitch at the given octave (C4 = 60).
    ///
    /// Returns `None` outside the 0-127 MIDI range.
    pub fn midi_number(&self, octave: i32) -> Option<u8> {
        let number = (octave + 1) * 12 + self.pitch_class as i32;
        u8::try_from(number).ok().filter(|n| *n <= 127)
    }

    fn is_natural(pitch_class: u8) -> bool {
        matches!(pitch_class, 0 | 2 | 4 | 5 | 7 | 9 | 11)
    }

    fn natural_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            0 => "C",
            2 => "D",
            4 => "E",
            5 => "F",
            7 => "G",
            9 => "A",
            11 => "B",
            _ => "",
        }
    }

    fn sharp_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            1 => "C#",
            3 => "D#",
            6 => "F#",
            8 => "G#",
            10 => "A#",
            _ => "",
        }
    }

    fn flat_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            1 => "Db",
            3 => "Eb",
            6 => "Gb",
            8 => "Ab",
            10 => "Bb",
            _ => "",
        }
    }

    /// Display name for this pitch (without octave)
    pub fn name(&self) -> &'static str {
        if Self::is_natural(self.pitch_class) {
            return Self::natural_name(self.pitch_class);
        }
        match self.accidental {
            Accidental::Flat => Self::flat_name(self.pitch_class),
            Accidental::Sharp | Accidental::Natural => Self::sharp_name(self.pitch_class),
        }
    }
}

impl FromStr for PitchName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();

        // Legacy 'S' suffix is accepted for sharps ("CS" == "C#")
        let (pitch_class, accidental) = match upper.as_str() {
            "C" => (0, Accidental::Natural),
            "D" => (2, Accidental::Natural),
            "E" => (4, Accidental::Natural),
            "F" => (5, Accidental::Natural),
            "G" => (7, Accidental::Natural),
            "A" => (9, Accidental::Natural),
            "B" => (11, Accidental::Natural),

            "C#" | "CS" => (1, Accidental::Sharp),
            "D#" | "DS" => (3, Accidental::Sharp),
            "F#" | "FS" => (6, Accidental::Sharp),
            "G#" | "GS" => (8, Accidental::Sharp),
            "A#" | "AS" => (10, Accidental::Sharp),

            "DB" => (1, Accidental::Flat),
            "EB" => (3, Accidental::Flat),
            "GB" => (6, Accidental::Flat),
            "AB" => (8, Accidental::Flat),
            "BB" => (10, Accidental::Flat),

            _ => return Err(anyhow!("Invalid pitch name: '{}'", trimmed)),
        };

        Ok(PitchName {
            pitch_class,
            accidental,
        })
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<PitchName> for String {
    fn from(pitch: PitchName) -> Self {
        pitch.name().to_string()
    }
}

impl TryFrom<String> for PitchName {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_parsing() {
        let c: PitchName = "C".parse().unwrap();
        assert_eq!(c.pitch_class(), 0);

        let cs: PitchName = "C#".parse().unwrap();
        assert_eq!(cs.pitch_class(), 1);

        let db: PitchName = "Db".parse().unwrap();
        assert_eq!(db.pitch_class(), 1);

        let padded: PitchName = " g# ".parse().unwrap();
        assert_eq!(padded.pitch_class(), 8);

        let invalid: Result<PitchName> = "H".parse();
        assert!(invalid.is_err());
        assert!("".parse::<PitchName>().is_err());
    }

    #[test]
    fn test_spelling_is_preserved() {
        let bb: PitchName = "Bb".parse().unwrap();
        assert_eq!(bb.to_string(), "Bb");

        let a_sharp: PitchName = "A#".parse().unwrap();
        assert_eq!(a_sharp.to_string(), "A#");
        assert_eq!(bb.pitch_class(), a_sharp.pitch_class());

        let fs: PitchName = "fs".parse().unwrap();
        assert_eq!(fs.to_string(), "F#");
    }

    #[test]
    fn test_midi_numbers() {
        let c: PitchName = "C".parse().unwrap();
        assert_eq!(c.midi_number(4), Some(60));
        assert_eq!(c.midi_number(-1), Some(0));

        let a: PitchName = "A".parse().unwrap();
        assert_eq!(a.midi_number(4), Some(69));

        let g: PitchName = "G".parse().unwrap();
        assert_eq!(g.midi_number(9), Some(127));
        assert_eq!("G#".parse::<PitchName>().unwrap().midi_number(9), None);
        assert_eq!(c.midi_number(-2), None);
    }

    #[test]
    fn test_octave_frequencies() {
        let a: PitchName = "A".parse().unwrap();
        assert!((a.frequency(4) - 440.0).abs() < 0.01);
        assert!((a.frequency(5) - 880.0).abs() < 0.01);
        assert!((a.frequency(3) - 220.0).abs() < 0.01);
    }
}
