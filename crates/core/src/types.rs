//! Type aliases and unit-interval constants.

/// Type alias to make it easier to switch out what datatype is used for Utility scores.
pub type Score = f32;

pub const MIN_SCORE: Score = 0.;
pub const MAX_SCORE: Score = 1.;

/// Saturates a value to the unit interval.
#[inline]
pub fn clamp01(value: Score) -> Score {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Type alias for the plain-string keys linking a Decision to its Action implementation.
/// Action Keys are effectively IDs, so they do not need to be human-readable.
pub type ActionKey = String;
