//! Composition generation engine
//!
//! Pipeline: [`CompositionSource`] -> [`PitchLadder`] -> [`sequencer`] (closed
//! patterns) -> [`tiler`] -> [`Composition`]. Generation is a pure function of
//! its input: no clock, no randomness, no state shared between calls.

pub mod error;
pub mod ladder;
pub mod sequencer;
pub mod tiler;

pub use error::GenerationError;
pub use ladder::{Direction, LadderCursor, PitchLadder, Rung};
pub use sequencer::{Sequence, SequencerConfig};

use crate::types::{Composition, CompositionSource, Pattern, Time, TimeSignature};
use tracing::debug;

/// Closed patterns of a generation run, before tiling
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub time_signature: TimeSignature,
    pub tempo: f64,
    pub unique_track_per_pattern: bool,
    pub patterns: Vec<Pattern>,
    /// Position reached when the last pattern closed
    pub total_length: Time,
}

impl Generation {
    /// Tile the patterns into the final composition
    pub fn to_composition(&self) -> Composition {
        let tracks = tiler::tile(
            &self.patterns,
            self.total_length,
            self.time_signature,
            self.unique_track_per_pattern,
        );
        let composition = Composition {
            time_signature: self.time_signature,
            tempo: self.tempo,
            total_length: self.total_length,
            tracks,
        };
        debug!(
            patterns = self.patterns.len(),
            tracks = composition.tracks.len(),
            notes = composition.note_count(),
            total_length = %self.total_length,
            "composition tiled"
        );
        composition
    }
}

/// Validate the source and generate its closed patterns
pub fn generate_patterns(source: &CompositionSource) -> Result<Generation, GenerationError> {
    let time_signature = source.checked_time_signature()?;
    let tempo = source.checked_tempo()?;
    let ladder = PitchLadder::build(&source.scale, source.octave_lower, source.octave_upper)?;
    let note_lengths = source.checked_note_lengths()?;
    let pattern_length = source.checked_pattern_length()?;
    let pattern_amount = source.checked_pattern_amount()?;

    let config = SequencerConfig {
        time_signature,
        note_lengths,
        pattern_length,
        pattern_amount,
    };
    let Sequence {
        patterns,
        total_length,
    } = sequencer::sequence(&config, ladder.cursor());

    Ok(Generation {
        time_signature,
        tempo,
        unique_track_per_pattern: source.unique_track_per_pattern,
        patterns,
        total_length,
    })
}

/// Generate the full composition for `source`
pub fn generate(source: &CompositionSource) -> Result<Composition, GenerationError> {
    Ok(generate_patterns(source)?.to_composition())
}
