use std::fmt;

/// Input validation failures. Generation aborts on any of these and no
/// partial composition is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The scale is empty or contains an unknown pitch name
    InvalidScale { reason: String },
    /// `octaveLower` must be below `octaveUpper`
    InvalidOctaveRange { lower: i32, upper: i32 },
    /// A note length is not a positive, representable number of beats
    InvalidNoteLength {
        field: &'static str,
        value: f64,
        reason: String,
    },
    /// Pattern length or pattern amount out of range
    InvalidPatternParameters { field: &'static str, reason: String },
    /// Tempo is zero, negative or not finite
    DegenerateTempo { tempo: f64 },
    /// Time signature numerator or denominator is zero or too large
    InvalidTimeSignature { numerator: u32, denominator: u32 },
}

impl GenerationError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            GenerationError::InvalidScale { .. } => "scale",
            GenerationError::InvalidOctaveRange { .. } => "octaveLower/octaveUpper",
            GenerationError::InvalidNoteLength { field, .. } => *field,
            GenerationError::InvalidPatternParameters { field, .. } => *field,
            GenerationError::DegenerateTempo { .. } => "tempo",
            GenerationError::InvalidTimeSignature { .. } => "timeSigBeatAmount/timeSigBeatUnit",
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidScale { reason } => write!(f, "Invalid scale: {}", reason),
            GenerationError::InvalidOctaveRange { lower, upper } => write!(
                f,
                "Invalid octave range: octaveLower ({}) must be below octaveUpper ({})",
                lower, upper
            ),
            GenerationError::InvalidNoteLength { field, reason, .. } => {
                write!(f, "Invalid note length: {} {}", field, reason)
            }
            GenerationError::InvalidPatternParameters { field, reason } => {
                write!(f, "Invalid pattern parameters: {} {}", field, reason)
            }
            GenerationError::DegenerateTempo { tempo } => {
                write!(f, "Degenerate tempo: tempo must be > 0 BPM, got {}", tempo)
            }
            GenerationError::InvalidTimeSignature {
                numerator,
                denominator,
            } => write!(
                f,
                "Invalid time signature {}/{}: both parts must be between 1 and {}",
                numerator,
                denominator,
                crate::types::source::MAX_TIME_SIGNATURE_PART
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        let err = GenerationError::InvalidNoteLength {
            field: "note2Length",
            value: 0.0,
            reason: "must be > 0, got 0".to_string(),
        };
        assert_eq!(err.field(), "note2Length");
        assert_eq!(GenerationError::DegenerateTempo { tempo: 0.0 }.field(), "tempo");
        assert_eq!(
            GenerationError::InvalidOctaveRange { lower: 3, upper: 3 }.field(),
            "octaveLower/octaveUpper"
        );
    }

    #[test]
    fn test_display_names_field() {
        let err = GenerationError::InvalidPatternParameters {
            field: "patternAmount",
            reason: "must be at least 1, got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid pattern parameters: patternAmount must be at least 1, got 0"
        );
    }
}
