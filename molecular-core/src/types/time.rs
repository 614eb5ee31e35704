//! Rational timing types for exact composition timing
//!
//! Every position in a composition is measured in beat units, where one beat
//! unit is a measure divided by the time signature denominator. Exact
//! rationals keep the offset divisibility test free of floating-point drift.

use num_rational::Ratio;
use num_traits::Zero;

/// Exact time point using rationals (beat units from composition start)
pub type Time = Ratio<i64>;

/// Denominator used when quantising real-valued inputs.
/// 9600 is divisible by every common musical subdivision (2, 3, 4, 5, 6, 8, 12, 16, 24, 32...).
pub const QUANTUM: i64 = 9600;

/// A half-open time span [start, end)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Time,
    pub end: Time,
}

impl Span {
    /// Create a new span from start to end
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Length of this span
    pub fn length(&self) -> Time {
        self.end - self.start
    }

    /// Check if a time point falls within this span [start, end)
    pub fn contains(&self, t: Time) -> bool {
        t >= self.start && t < self.end
    }
}

/// Helper to create Time from a ratio n/d
#[inline]
pub fn time(n: i64, d: i64) -> Time {
    Ratio::new(n, d)
}

/// Create Time from an integer (whole beat units)
#[inline]
pub fn beats(n: i64) -> Time {
    Ratio::from_integer(n)
}

/// Convert rational to f64 for audio output
#[inline]
pub fn to_f64(t: Time) -> f64 {
    *t.numer() as f64 / *t.denom() as f64
}

/// Quantise an f64 onto the [`QUANTUM`] grid.
///
/// Non-finite input maps to zero so callers can reject it with a single
/// `<= 0` check.
pub fn from_f64(f: f64) -> Time {
    if !f.is_finite() {
        return Time::zero();
    }
    let numer = (f * QUANTUM as f64).round() as i64;
    Ratio::new(numer, QUANTUM)
}

/// Whole number of `unit`-sized steps contained in `t` (floor division)
pub fn whole_units(t: Time, unit: Time) -> i64 {
    (t / unit).floor().to_integer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_arithmetic() {
        let a = time(1, 3);
        let b = time(1, 6);
        assert_eq!(a + b, time(1, 2));
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(beats(4), beats(10));
        assert!(span.contains(beats(4)));
        assert!(span.contains(time(19, 2)));
        assert!(!span.contains(beats(10))); // End is exclusive
        assert!(!span.contains(beats(3)));
    }

    #[test]
    fn test_span_length() {
        assert_eq!(Span::new(beats(4), beats(7)).length(), beats(3));
    }

    #[test]
    fn test_from_f64_exact_for_musical_values() {
        assert_eq!(from_f64(3.5), time(7, 2));
        assert_eq!(from_f64(0.5), time(1, 2));
        assert_eq!(from_f64(14.5), time(29, 2));
        assert_eq!(from_f64(1.0 / 3.0), time(1, 3));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(from_f64(f64::NAN), beats(0));
        assert_eq!(from_f64(f64::INFINITY), beats(0));
    }

    #[test]
    fn test_whole_units() {
        assert_eq!(whole_units(beats(7), beats(4)), 1);
        assert_eq!(whole_units(beats(8), beats(4)), 2);
        assert_eq!(whole_units(time(3, 2), beats(4)), 0);
    }

    #[test]
    fn test_to_f64() {
        assert!((to_f64(time(1, 3)) - 0.333333333).abs() < 0.0001);
    }
}
