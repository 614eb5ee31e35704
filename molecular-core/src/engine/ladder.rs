//! Pitch ladder: the scale expanded over an octave range, walked back and forth.

use super::error::GenerationError;
use crate::types::PitchName;

/// A single rung of the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub pitch: PitchName,
    pub octave: i32,
}

/// The scale repeated once per octave from `octave_lower` to `octave_upper`
/// inclusive. The octave increments each time the scale wraps, regardless of
/// where C falls in the scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchLadder {
    rungs: Vec<Rung>,
}

impl PitchLadder {
    /// Build the ladder from scale entries and an octave range
    pub fn build<S: AsRef<str>>(
        scale: &[S],
        octave_lower: i32,
        octave_upper: i32,
    ) -> Result<Self, GenerationError> {
        if scale.is_empty() {
            return Err(GenerationError::InvalidScale {
                reason: "scale must contain at least one pitch".to_string(),
            });
        }
        let pitches = scale
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .parse::<PitchName>()
                    .map_err(|e| GenerationError::InvalidScale {
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if octave_lower >= octave_upper {
            return Err(GenerationError::InvalidOctaveRange {
                lower: octave_lower,
                upper: octave_upper,
            });
        }

        let rungs = (octave_lower..=octave_upper)
            .flat_map(|octave| pitches.iter().map(move |&pitch| Rung { pitch, octave }))
            .collect();

        Ok(PitchLadder { rungs })
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// A cursor positioned on the lowest rung, ascending
    pub fn cursor(&self) -> LadderCursor<'_> {
        LadderCursor {
            ladder: self,
            position: 0,
            direction: Direction::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Bidirectional cursor over a ladder.
///
/// Walking past either end reverses direction and continues from the
/// neighbouring rung, so the turning rung is not repeated.
#[derive(Debug, Clone)]
pub struct LadderCursor<'a> {
    ladder: &'a PitchLadder,
    position: usize,
    direction: Direction,
}

impl<'a> LadderCursor<'a> {
    /// The rung under the cursor
    pub fn current(&self) -> Rung {
        self.ladder.rungs[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one rung in the current direction, turning around at the ends
    pub fn advance(&mut self) {
        let last = self.ladder.len() - 1;
        if last == 0 {
            return;
        }
        match self.direction {
            Direction::Ascending if self.position == last => {
                self.direction = Direction::Descending;
                self.position -= 1;
            }
            Direction::Ascending => self.position += 1,
            Direction::Descending if self.position == 0 => {
                self.direction = Direction::Ascending;
                self.position += 1;
            }
            Direction::Descending => self.position -= 1,
        }
    }
}

impl Iterator for LadderCursor<'_> {
    type Item = Rung;

    /// Yields the current rung, then advances. Never ends.
    fn next(&mut self) -> Option<Rung> {
        let rung = self.current();
        self.advance();
        Some(rung)
    }
}
