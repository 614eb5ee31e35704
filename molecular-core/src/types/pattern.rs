//! Pattern: a bounded run of notes generated in one continuous pass.
//!
//! Once closed, a pattern is tiled (looped) over the rest of the composition.
//! Its relative note offsets drive the offset conflict test that decides
//! when the generator swaps note lengths.

use super::note::Note;
use super::time::{to_f64, Span, Time};
use anyhow::{anyhow, Result};
use num_traits::Zero;
use std::fmt;

#[cfg(feature = "colored")]
use colored::*;

/// An ordered run of notes with its composition start offset.
///
/// Invariant: notes are non-decreasing in offset (insertion order is time order).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    notes: Vec<Note>,
    index: usize,
    start_offset: Time,
}

impl Pattern {
    /// Open an empty, in-progress pattern beginning at `start_offset`
    pub fn open(start_offset: Time) -> Self {
        Pattern {
            notes: Vec::new(),
            index: 0,
            start_offset,
        }
    }

    /// Build a closed pattern from existing notes, checking the ordering invariant
    pub fn with_notes(index: usize, start_offset: Time, notes: Vec<Note>) -> Result<Self> {
        if let Some(pair) = notes.windows(2).find(|w| w[1].offset() < w[0].offset()) {
            return Err(anyhow!(
                "Pattern notes must be time ordered: {} precedes {}",
                pair[0],
                pair[1]
            ));
        }
        Ok(Pattern {
            notes,
            index,
            start_offset,
        })
    }

    /// Append a note. Notes arrive in time order from the generator.
    pub(crate) fn push(&mut self, note: Note) {
        debug_assert!(
            self.notes.last().map_or(true, |last| last.offset() <= note.offset()),
            "notes must be appended in time order"
        );
        self.notes.push(note);
    }

    /// Close the pattern, assigning its index in the generated sequence
    pub(crate) fn close(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// 0-based position of this pattern in the generated sequence
    pub fn index(&self) -> usize {
        self.index
    }

    /// Composition time at which this pattern began accumulating notes
    pub fn start_offset(&self) -> Time {
        self.start_offset
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Offset of the first note, or zero when empty
    pub fn range_start(&self) -> Time {
        self.notes.first().map_or_else(Time::zero, |n| n.offset())
    }

    /// End of the last note, or zero when empty
    pub fn range_end(&self) -> Time {
        self.notes.last().map_or_else(Time::zero, |n| n.end())
    }

    pub fn range_length(&self) -> Time {
        self.range_end() - self.range_start()
    }

    pub fn range(&self) -> Span {
        Span::new(self.range_start(), self.range_end())
    }

    /// Note offsets measured from this pattern's own start
    pub fn relative_offsets(&self) -> impl Iterator<Item = Time> + '_ {
        self.notes.iter().map(move |n| n.offset() - self.start_offset)
    }

    /// Check whether a note at `relative_offset` (measured from the start of
    /// another pattern) will eventually coincide with one of this pattern's
    /// notes once both patterns repeat.
    ///
    /// A note at this pattern's own start collides only with a candidate at
    /// relative offset zero. Any other note collides with every candidate
    /// whose relative offset is an exact integer multiple of its own, zero
    /// included.
    pub fn conflicts_with(&self, relative_offset: Time) -> bool {
        self.relative_offsets().any(|actual| {
            if actual.is_zero() {
                relative_offset.is_zero()
            } else {
                (relative_offset % actual).is_zero()
            }
        })
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pitches: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("{}{}", n.pitch(), n.octave()).cyan().to_string())
            .collect();
        write!(
            f,
            "{} @ {:.3}: {} ({:.3} beats)",
            format!("Pattern {}", self.index + 1).bold(),
            to_f64(self.start_offset),
            pitches.join(" "),
            to_f64(self.range_length())
        )
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pitches: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("{}{}", n.pitch(), n.octave()))
            .collect();
        write!(
            f,
            "Pattern {} @ {:.3}: {} ({:.3} beats)",
            self.index + 1,
            to_f64(self.start_offset),
            pitches.join(" "),
            to_f64(self.range_length())
        )
    }
}
