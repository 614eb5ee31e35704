//! Pattern tiling: loops every closed pattern from its start to the end of the
//! composition, so early patterns repeat many times while the last plays once.

use crate::types::{Note, Pattern, Span, Time, TimeSignature, Track};
use num_traits::Zero;

/// Name of the single merged output track
pub const MELODY_TRACK: &str = "melody";

/// Repeat `pattern` at successive multiples of its range length until the
/// copies reach `total_length`.
///
/// Copies that would start at or after `total_length` are dropped. Kept notes
/// keep their full duration even if they ring past the end.
pub fn tile_pattern(pattern: &Pattern, total_length: Time, time_signature: TimeSignature) -> Vec<Note> {
    let range = pattern.range().length();
    if pattern.is_empty() || range.is_zero() {
        return Vec::new();
    }

    let window = Span::new(pattern.start_offset(), total_length);
    let mut notes = Vec::new();
    let mut shift = Time::zero();
    while window.contains(pattern.start_offset() + shift) {
        for note in pattern.notes() {
            let offset = note.offset() + shift;
            if !window.contains(offset) {
                break;
            }
            notes.push(note.shifted(offset, time_signature.measure_at(offset)));
        }
        shift += range;
    }
    notes
}

/// Tile every pattern into output tracks.
///
/// With `unique_track_per_pattern` each pattern gets its own track
/// (`pattern 1`, `pattern 2`, ...). Otherwise all notes are merged in pattern
/// order into one track and stably sorted by offset.
pub fn tile(
    patterns: &[Pattern],
    total_length: Time,
    time_signature: TimeSignature,
    unique_track_per_pattern: bool,
) -> Vec<Track> {
    if unique_track_per_pattern {
        return patterns
            .iter()
            .map(|pattern| Track {
                name: format!("pattern {}", pattern.index() + 1),
                notes: tile_pattern(pattern, total_length, time_signature),
            })
            .collect();
    }

    let mut melody = Track::new(MELODY_TRACK);
    for pattern in patterns {
        melody
            .notes
            .extend(tile_pattern(pattern, total_length, time_signature));
    }
    melody.notes.sort_by(|a, b| a.offset().cmp(&b.offset()));
    vec![melody]
}
