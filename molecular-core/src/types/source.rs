//! CompositionSource: the immutable input of a generation request.

use super::composition::TimeSignature;
use super::time::{from_f64, Time, QUANTUM};
use crate::engine::error::GenerationError;
use num_traits::Zero;

/// Largest accepted note or pattern length, in beat units
pub const MAX_LENGTH_BEATS: f64 = 65536.0;
/// Largest accepted time signature numerator or denominator
pub const MAX_TIME_SIGNATURE_PART: u32 = 256;
/// Largest accepted pattern amount
pub const MAX_PATTERN_AMOUNT: u32 = 1024;

/// Parameters describing a composition to generate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct CompositionSource {
    pub name: String,
    pub description: String,
    /// Time signature numerator (beats per measure)
    pub time_sig_beat_amount: u32,
    /// Time signature denominator (beat unit)
    pub time_sig_beat_unit: u32,
    /// Beats per minute
    pub tempo: f64,
    /// Ordered pitch names walked by the generator. Reads either a JSON
    /// array or the comma separated text of the original form.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_scale"))]
    pub scale: Vec<String>,
    /// First note length, in beat units
    pub note1_length: f64,
    /// Alternate note length, in beat units
    pub note2_length: f64,
    /// Target pattern length, in beat units
    pub pattern_length: f64,
    /// Number of patterns to generate before tiling
    pub pattern_amount: u32,
    pub octave_lower: i32,
    pub octave_upper: i32,
    /// Write each pattern to its own track instead of merging
    pub unique_track_per_pattern: bool,
}

impl CompositionSource {
    /// Split a comma separated scale ("E, F ,G") into trimmed pitch names
    pub fn parse_scale(scale: &str) -> Vec<String> {
        scale
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Name for display: the given name, or `{note1}{firstPitch}{note2}`
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        let first = self.scale.first().map(|s| s.trim()).unwrap_or_default();
        format!("{}{}{}", self.note1_length, first, self.note2_length)
    }

    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::new(self.time_sig_beat_amount, self.time_sig_beat_unit)
    }

    /// Validate every field, returning the first failure.
    ///
    /// Scale contents and the octave range are checked when the pitch ladder
    /// is built; this covers the numeric fields as well.
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.checked_time_signature()?;
        self.checked_tempo()?;
        crate::engine::ladder::PitchLadder::build(
            &self.scale,
            self.octave_lower,
            self.octave_upper,
        )?;
        self.checked_note_lengths()?;
        self.checked_pattern_length()?;
        self.checked_pattern_amount()?;
        Ok(())
    }

    pub(crate) fn checked_time_signature(&self) -> Result<TimeSignature, GenerationError> {
        let in_range = |part: u32| (1..=MAX_TIME_SIGNATURE_PART).contains(&part);
        if !in_range(self.time_sig_beat_amount) || !in_range(self.time_sig_beat_unit) {
            return Err(GenerationError::InvalidTimeSignature {
                numerator: self.time_sig_beat_amount,
                denominator: self.time_sig_beat_unit,
            });
        }
        Ok(self.time_signature())
    }

    pub(crate) fn checked_tempo(&self) -> Result<f64, GenerationError> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(GenerationError::DegenerateTempo { tempo: self.tempo });
        }
        Ok(self.tempo)
    }

    pub(crate) fn checked_note_lengths(&self) -> Result<(Time, Time), GenerationError> {
        let checked = |field: &'static str, value: f64| {
            checked_length(value)
                .map_err(|reason| GenerationError::InvalidNoteLength { field, value, reason })
        };
        Ok((
            checked("note1Length", self.note1_length)?,
            checked("note2Length", self.note2_length)?,
        ))
    }

    pub(crate) fn checked_pattern_length(&self) -> Result<Time, GenerationError> {
        checked_length(self.pattern_length).map_err(|reason| {
            GenerationError::InvalidPatternParameters {
                field: "patternLength",
                reason,
            }
        })
    }

    pub(crate) fn checked_pattern_amount(&self) -> Result<usize, GenerationError> {
        if !(1..=MAX_PATTERN_AMOUNT).contains(&self.pattern_amount) {
            return Err(GenerationError::InvalidPatternParameters {
                field: "patternAmount",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_PATTERN_AMOUNT, self.pattern_amount
                ),
            });
        }
        Ok(self.pattern_amount as usize)
    }
}

impl Default for CompositionSource {
    fn default() -> Self {
        crate::presets::default_source()
    }
}

#[cfg(feature = "serde")]
fn deserialize_scale<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scale {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Scale::deserialize(deserializer)? {
        Scale::Text(text) => CompositionSource::parse_scale(&text),
        Scale::List(names) => names,
    })
}

/// Quantise a length in beats. Accepted lengths are non-zero multiples of
/// 1/QUANTUM no larger than [`MAX_LENGTH_BEATS`]; the error is the reason.
fn checked_length(value: f64) -> Result<Time, String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("must be > 0, got {}", value));
    }
    if value > MAX_LENGTH_BEATS {
        return Err(format!("must be at most {} beats, got {}", MAX_LENGTH_BEATS, value));
    }
    let t = from_f64(value);
    if t.is_zero() {
        return Err(format!("is below the 1/{}-beat resolution, got {}", QUANTUM, value));
    }
    Ok(t)
}
