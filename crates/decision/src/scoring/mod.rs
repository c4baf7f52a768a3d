//! Utility scoring primitives.
//!
//! A [`Consideration`] maps one aspect of an [`AiContext`] to a score in
//! `[0, 1]`, usually by normalizing a raw input and passing it through a
//! [`ResponseCurve`]. An [`Aggregator`] folds the considerations of an action
//! into a single utility.

mod aggregator;
pub mod considerations;

pub use aggregator::{Aggregator, MIN_SCORE};

use crate::context::AiContext;

/// Clamps a raw score into `[0, 1]`. NaN scores as zero.
#[inline]
pub fn clamp_score(raw: f32) -> f32 {
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
}

/// One scoring input of a utility action.
pub trait Consideration: Send + Sync {
    /// Short label used in debug logs.
    fn name(&self) -> &str;

    /// Scores the context. Values outside `[0, 1]` are clamped by the caller.
    fn score(&self, ctx: &AiContext<'_>) -> f32;
}

/// Shapes a normalized input `x` in `[0, 1]` into a score.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCurve {
    /// `x`
    Linear,
    /// `1 - x`
    Inverse,
    /// `x²`
    Quadratic,
    /// `(1 - x)²`
    InverseQuadratic,
    /// 1 at or above the threshold, 0 below.
    Step { threshold: f32 },
    /// Linear map of `[0, 1]` onto `[from, to]`. `from > to` inverts.
    Remap { from: f32, to: f32 },
}

impl ResponseCurve {
    pub fn apply(self, input: f32) -> f32 {
        let x = clamp_score(input);
        let y = match self {
            ResponseCurve::Linear => x,
            ResponseCurve::Inverse => 1.0 - x,
            ResponseCurve::Quadratic => x * x,
            ResponseCurve::InverseQuadratic => (1.0 - x) * (1.0 - x),
            ResponseCurve::Step { threshold } => {
                if x >= threshold {
                    1.0
                } else {
                    0.0
                }
            }
            ResponseCurve::Remap { from, to } => from + (to - from) * x,
        };
        clamp_score(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_out_of_range_and_nan() {
        assert_eq!(clamp_score(-0.5), 0.0);
        assert_eq!(clamp_score(1.5), 1.0);
        assert_eq!(clamp_score(f32::NAN), 0.0);
        assert_eq!(clamp_score(0.25), 0.25);
    }

    #[test]
    fn curves() {
        assert_eq!(ResponseCurve::Linear.apply(0.3), 0.3);
        assert!((ResponseCurve::Inverse.apply(0.3) - 0.7).abs() < 1e-6);
        assert!((ResponseCurve::Quadratic.apply(0.5) - 0.25).abs() < 1e-6);
        assert!((ResponseCurve::InverseQuadratic.apply(0.5) - 0.25).abs() < 1e-6);
        assert_eq!(ResponseCurve::Step { threshold: 0.5 }.apply(0.49), 0.0);
        assert_eq!(ResponseCurve::Step { threshold: 0.5 }.apply(0.5), 1.0);

        let remap = ResponseCurve::Remap { from: 1.0, to: 0.5 };
        assert_eq!(remap.apply(0.0), 1.0);
        assert_eq!(remap.apply(1.0), 0.5);
    }

    #[test]
    fn curves_clamp_their_input() {
        assert_eq!(ResponseCurve::Linear.apply(2.0), 1.0);
        assert_eq!(ResponseCurve::Inverse.apply(-1.0), 1.0);
    }
}
