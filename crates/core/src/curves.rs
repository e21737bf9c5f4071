/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/
//! Utility Curves - pure functions on a unit interval that modulate Consideration responses.
//!
//! For Utility AI purposes, all Curves have a unit interval domain (i.e. 0.0 to 1.0),
//! and a range of values that is ALSO a unit interval (visually, forming a 1x1 square).
//! On top of that most of them are fairly simple and cheap (by necessity).
//!
//! The main purpose of these Curves is to make Considerations more *expressive*.
//!
//! A Consideration will give us the current Health, but should the Decision score
//! be higher (e.g. for RecklessAttack) or lower (e.g. for Heal) the higher the
//! Health value is? Or perhaps the highest score should be around the middle?
//! And even if higher is better, does 10% higher == 10% better, or is it nonlinear?
//!
//! Curves provide us with the tool to handle this by mapping from the input to the output smoothly.
//!
//! To use a Curve, include its key in the DecisionPackage data. Consideration inputs
//! are automatically rescaled to the Curve's input range and fed through by the
//! scoring code. Custom Curves can be registered into a [`CurveRegistry`] under any
//! key that does not collide with a built-in one.

use std::sync::Arc;
use std::collections::HashMap;

use crate::errors::RegistryError;
use crate::identifiers::CurveId;
use crate::types::{MAX_SCORE, MIN_SCORE, Score, clamp01};

/// Curve functions suitable for Utility scoring purposes.
///
/// All eligible functions must have a unit domain (i.e. <0.0; 1.0>) **AND** an output
/// range of unity as well, or at least you must be willing to allow them to be clamped
/// to this range by the `sample_safe(&self, t)` method provided.
pub trait UtilityCurve: Send + Sync {
    /// Sample the curve at `t`, assuming `t` is already inside the unit interval.
    fn sample_unchecked(&self, t: Score) -> Score;

    /// **IMPORTANT!** Use this method for sampling for Utility purposes.
    ///
    /// Samples a given point on the curve, clamping **both** the input and the
    /// output values to a unit square. An implementation that produces a non-finite
    /// value for some input is read as zero rather than poisoning the score product.
    fn sample_safe(&self, t: Score) -> Score {
        let raw = self.sample_unchecked(clamp01(t));
        if raw.is_finite() {
            raw.clamp(MIN_SCORE, MAX_SCORE)
        } else {
            MIN_SCORE
        }
    }

    /// A compact, human-readable description for diagnostic traces.
    fn describe(&self) -> String;
}

/// The built-in Utility Curves - a curated selection of building blocks that
/// should cover the majority of your needs.
///
/// The `Anti*` variants are the inverse-sampled (`1 - f(t)`) twins of their
/// namesakes. `Parametric` is the generalized escape hatch when none of the
/// named shapes fit.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseCurve {
    /// Always returns the same value; mainly useful as a placeholder or for
    /// temporarily knocking a Decision out without deleting it from data.
    Constant(Score),

    /// Identity on the unit interval. The most fundamental 'fuzzy logic' curve;
    /// recommended first option until it becomes clear you need bigger guns.
    Linear,

    /// `1 - t`. Linear's Opposite Day evil twin.
    AntiLinear,

    /// `t^2`. More 'picky' than Linear, with Utility falling off faster
    /// the further the input is from the max.
    Square,

    /// `1 - t^2`.
    AntiSquare,

    /// A curve equivalent of an if-statement: max Utility for `t >= 1.0`
    /// (i.e. the un-normalized input is at or above the Consideration's Max),
    /// zero otherwise. Dirt-cheap; great for filtering, bad at nuance.
    AtLeast,

    /// `t < 1.0` as an if-statement; the inverse-sampled AtLeast.
    LessThan,

    /// A 'band-pass' peaking at t=0.5 with minima at 0.0 and 1.0; an equilateral
    /// triangle shape. Use when the optimal values are somewhere in the middle
    /// (not too close, not too far).
    Triangle,

    /// A 'band-stop' with maxima at the extremes and a trough at t=0.5.
    AntiTriangle,

    /// The generalized parametric family:
    ///
    /// `clamp01(slope * (t - h_shift)^exponent + v_shift)`
    ///
    /// with inputs below `threshold` forced to zero outright. Non-finite
    /// intermediate values (e.g. a fractional exponent on a negative base)
    /// are read as zero.
    Parametric {
        slope: Score,
        exponent: Score,
        h_shift: Score,
        v_shift: Score,
        threshold: Score,
    },
}

impl ResponseCurve {
    /// A parametric curve with no threshold cutoff.
    pub fn parametric(slope: Score, exponent: Score, h_shift: Score, v_shift: Score) -> Self {
        Self::Parametric {
            slope,
            exponent,
            h_shift,
            v_shift,
            threshold: MIN_SCORE,
        }
    }

    /// Retrieves a built-in Utility curve based on a string(-ish) key.
    ///
    /// This only covers curves included with the library; custom curves
    /// go through a [`CurveRegistry`] instead.
    pub fn from_name<S: std::borrow::Borrow<str>>(name: S) -> Option<Self> {
        match name.borrow() {
            "ConstZero" => Some(Self::Constant(MIN_SCORE)),
            "ConstHalf" => Some(Self::Constant(0.5)),
            "ConstMax" => Some(Self::Constant(MAX_SCORE)),
            "Linear" => Some(Self::Linear),
            "AntiLinear" => Some(Self::AntiLinear),
            "Square" => Some(Self::Square),
            "AntiSquare" => Some(Self::AntiSquare),
            "AtLeast" => Some(Self::AtLeast),
            "LessThan" => Some(Self::LessThan),
            "Triangle" => Some(Self::Triangle),
            "AntiTriangle" => Some(Self::AntiTriangle),
            _ => None,
        }
    }
}

impl UtilityCurve for ResponseCurve {
    fn sample_unchecked(&self, t: Score) -> Score {
        match self {
            Self::Constant(v) => *v,
            Self::Linear => t,
            Self::AntiLinear => 1. - t,
            Self::Square => t * t,
            Self::AntiSquare => 1. - t * t,
            Self::AtLeast => {
                match t >= 1. {
                    true => 1.,
                    false => 0.,
                }
            }
            Self::LessThan => {
                match t < 1. {
                    true => 1.,
                    false => 0.,
                }
            }
            Self::Triangle => 1. - (2. * t - 1.).abs(),
            Self::AntiTriangle => (2. * t - 1.).abs(),
            Self::Parametric {
                slope,
                exponent,
                h_shift,
                v_shift,
                threshold,
            } => {
                if t < *threshold {
                    return MIN_SCORE;
                }
                let raw = slope * (t - h_shift).powf(*exponent) + v_shift;
                if raw.is_finite() {
                    clamp01(raw)
                } else {
                    MIN_SCORE
                }
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Constant(v) => format!("const({v})"),
            Self::Linear => "linear".to_string(),
            Self::AntiLinear => "antilinear".to_string(),
            Self::Square => "square".to_string(),
            Self::AntiSquare => "antisquare".to_string(),
            Self::AtLeast => "atleast".to_string(),
            Self::LessThan => "lessthan".to_string(),
            Self::Triangle => "triangle".to_string(),
            Self::AntiTriangle => "antitriangle".to_string(),
            Self::Parametric {
                slope,
                exponent,
                h_shift,
                v_shift,
                threshold,
            } => format!(
                "param(m={slope},exp={exponent},dx={h_shift},dy={v_shift},cut={threshold})"
            ),
        }
    }
}

/// A map that lets us request Utility Curves by a string key and register
/// new entries for custom Curves.
///
/// Built-in names always win; a registration attempt under a built-in key
/// is rejected rather than shadowed.
#[derive(Clone, Default)]
pub struct CurveRegistry {
    mapping: HashMap<CurveId, Arc<dyn UtilityCurve>>,
}

impl CurveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a key to a Curve, checking built-ins first, then custom registrations.
    pub fn resolve(&self, name: &CurveId) -> Option<Arc<dyn UtilityCurve>> {
        match ResponseCurve::from_name(name) {
            Some(builtin) => Some(Arc::new(builtin)),
            None => self.mapping.get(name).cloned(),
        }
    }

    pub fn register<C: UtilityCurve + 'static>(
        &mut self,
        key: CurveId,
        curve: C,
    ) -> Result<(), RegistryError> {
        if ResponseCurve::from_name(&key).is_some() {
            return Err(RegistryError::BuiltinCurveCollision(key.to_string()));
        }

        let old = self.mapping.insert(key.clone(), Arc::new(curve));
        if old.is_some() {
            #[cfg(feature = "logging")]
            tracing::warn!(key = %key, "curve key collision; ejecting previous registration");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Score, b: Score) -> bool {
        (a - b).abs() <= 1e-6
    }

    #[test]
    fn builtins_form_a_unit_square() {
        for name in [
            "ConstZero",
            "ConstHalf",
            "ConstMax",
            "Linear",
            "AntiLinear",
            "Square",
            "AntiSquare",
            "AtLeast",
            "LessThan",
            "Triangle",
            "AntiTriangle",
        ] {
            let curve = ResponseCurve::from_name(name).unwrap();
            for i in 0..=10 {
                let t = i as Score / 10.;
                let v = curve.sample_safe(t);
                assert!(
                    (MIN_SCORE..=MAX_SCORE).contains(&v),
                    "{name} escaped the unit square at t={t}: {v}"
                );
            }
        }
    }

    #[test]
    fn linear_is_identity_on_unit_interval() {
        assert!(close(ResponseCurve::Linear.sample_safe(0.2), 0.2));
        assert!(close(ResponseCurve::Linear.sample_safe(1.0), 1.0));
        // Out-of-range inputs saturate rather than extrapolate.
        assert!(close(ResponseCurve::Linear.sample_safe(3.0), 1.0));
        assert!(close(ResponseCurve::Linear.sample_safe(-3.0), 0.0));
    }

    #[test]
    fn anti_variants_mirror_their_base() {
        for i in 0..=10 {
            let t = i as Score / 10.;
            assert!(close(
                ResponseCurve::AntiLinear.sample_safe(t),
                1. - ResponseCurve::Linear.sample_safe(t)
            ));
            assert!(close(
                ResponseCurve::AntiSquare.sample_safe(t),
                1. - ResponseCurve::Square.sample_safe(t)
            ));
        }
    }

    #[test]
    fn triangle_peaks_at_midpoint() {
        assert!(close(ResponseCurve::Triangle.sample_safe(0.0), 0.0));
        assert!(close(ResponseCurve::Triangle.sample_safe(0.5), 1.0));
        assert!(close(ResponseCurve::Triangle.sample_safe(1.0), 0.0));
        assert!(close(ResponseCurve::Triangle.sample_safe(0.25), 0.5));
    }

    #[test]
    fn parametric_matches_the_formula() {
        // 0.5 * (t - 0)^2 + 0.25
        let curve = ResponseCurve::parametric(0.5, 2., 0., 0.25);
        assert!(close(curve.sample_safe(0.0), 0.25));
        assert!(close(curve.sample_safe(1.0), 0.75));
        assert!(close(curve.sample_safe(0.5), 0.375));
    }

    #[test]
    fn parametric_threshold_forces_zero() {
        let curve = ResponseCurve::Parametric {
            slope: 1.,
            exponent: 1.,
            h_shift: 0.,
            v_shift: 0.,
            threshold: 0.3,
        };
        assert!(close(curve.sample_safe(0.29), 0.0));
        assert!(close(curve.sample_safe(0.31), 0.31));
    }

    #[test]
    fn parametric_swallows_non_finite_results() {
        // Fractional exponent on a negative base => NaN; must read as zero.
        let curve = ResponseCurve::parametric(1., 0.5, 0.9, 0.);
        assert!(close(curve.sample_safe(0.1), 0.0));
    }

    #[test]
    fn registry_prefers_builtins_and_rejects_collisions() {
        let mut registry = CurveRegistry::new();

        let err = registry.register(CurveId::from("Linear"), ResponseCurve::Constant(0.5));
        assert!(err.is_err());

        registry
            .register(CurveId::from("MyCurve"), ResponseCurve::Constant(0.5))
            .unwrap();

        let resolved = registry.resolve(&CurveId::from("MyCurve")).unwrap();
        assert!(close(resolved.sample_safe(0.0), 0.5));
        assert!(registry.resolve(&CurveId::from("Linear")).is_some());
        assert!(registry.resolve(&CurveId::from("NoSuchCurve")).is_none());
    }
}
