//! Sequence generation: walks the pitch ladder placing notes of alternating
//! length and closing patterns once they reach the target length.

use super::ladder::LadderCursor;
use crate::types::{Note, Pattern, Time, TimeSignature};
use num_traits::Zero;
use tracing::{debug, trace};

/// Validated, exact parameters driving the sequencer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    pub time_signature: TimeSignature,
    /// The two alternating note lengths, in beat units
    pub note_lengths: (Time, Time),
    /// Requested pattern length, in beat units
    pub pattern_length: Time,
    pub pattern_amount: usize,
}

impl SequencerConfig {
    /// Beat units a pattern must accumulate before it closes.
    ///
    /// The requested length is rounded up to a whole number of measures.
    pub fn closing_threshold(&self) -> Time {
        let measure = self.time_signature.measure_length();
        let measures = (self.pattern_length / measure).ceil();
        measures * measure
    }
}

/// Closed patterns and the position reached when the last one closed
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub patterns: Vec<Pattern>,
    pub total_length: Time,
}

/// Run the sequencer until `pattern_amount` patterns have closed
pub fn sequence(config: &SequencerConfig, cursor: LadderCursor<'_>) -> Sequence {
    let (first_length, second_length) = config.note_lengths;
    let threshold = config.closing_threshold();

    let mut position = Time::zero();
    let mut bar_length = Time::zero();
    let mut note_length = first_length;
    let mut closed: Vec<Pattern> = Vec::with_capacity(config.pattern_amount);
    let mut current = Pattern::open(position);

    for rung in cursor {
        let relative = position - current.start_offset();

        // Swap lengths when this note would eventually land on a note of a
        // repeating, already closed pattern
        if closed
            .iter()
            .any(|p| !p.is_empty() && p.conflicts_with(relative))
        {
            note_length = if note_length == first_length {
                second_length
            } else {
                first_length
            };
            trace!(%position, %relative, %note_length, "offset conflict, swapped note length");
        }

        let measure = config.time_signature.measure_at(position);
        current.push(Note::new(rung.pitch, rung.octave, position, note_length, measure));

        position += note_length;
        bar_length += note_length;

        if bar_length >= threshold {
            let index = closed.len();
            let pattern = std::mem::replace(&mut current, Pattern::open(position)).close(index);
            debug!(
                index,
                notes = pattern.len(),
                start = %pattern.start_offset(),
                length = %pattern.range_length(),
                "pattern closed"
            );
            closed.push(pattern);
            bar_length = Time::zero();

            if closed.len() >= config.pattern_amount {
                break;
            }
        }
    }

    Sequence {
        patterns: closed,
        total_length: position,
    }
}
