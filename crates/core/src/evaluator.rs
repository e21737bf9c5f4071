/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The scoring core: turns one (Decision, Context) pair into a utility score.
//!
//! Requirements gate first; then the considerations multiply together, each
//! compensated upwards so that stacking many mild considerations does not
//! crush the product toward zero. The compensation follows the usual GDC
//! recipe: with N considerations, each response r is stretched to
//! `r + (1 - r) * (1 - 1/N) * r` before being multiplied in.
//!
//! Because the product can only shrink, a running score already below the
//! best score seen so far this tick (the `cutoff`) is a lost cause and the
//! remaining considerations are skipped entirely. This is what keeps large
//! decision packages cheap: most candidates die after one or two factors.

use crate::context::Context;
use crate::decision::{ResolvedConsideration, ResolvedRequirement};
use crate::trace::DecisionTrace;
use crate::types::{Score, clamp01};

pub struct DecisionEvaluator<W> {
    requirements: Vec<ResolvedRequirement<W>>,
    considerations: Vec<ResolvedConsideration<W>>,
    /// Compensation factor, `1 - 1/N` (zero when there are no considerations).
    mod_factor: Score,
}

impl<W> DecisionEvaluator<W> {
    pub fn new(
        requirements: Vec<ResolvedRequirement<W>>,
        considerations: Vec<ResolvedConsideration<W>>,
    ) -> Self {
        let count = considerations.len();
        let mod_factor = if count == 0 {
            0.
        } else {
            1. - 1. / count as Score
        };
        Self {
            requirements,
            considerations,
            mod_factor,
        }
    }

    pub fn consideration_count(&self) -> usize {
        self.considerations.len()
    }

    /// Scores one candidate Context.
    ///
    /// `bonus` is additive seed priority (momentum, designer boosts);
    /// `cutoff` is the score to beat, already normalized to this decision's
    /// weight. Returns zero for any disqualified or pruned candidate, so a
    /// positive return always means "this candidate is viable".
    pub fn score(
        &self,
        world: &W,
        decision_name: &str,
        ctx: &Context,
        bonus: Score,
        cutoff: Score,
        trace: &mut dyn DecisionTrace,
    ) -> Score {
        for requirement in &self.requirements {
            let passed = (requirement.check)(world, ctx);
            trace.requirement_checked(decision_name, requirement.name.as_str(), passed);
            if !passed {
                return 0.;
            }
        }

        let mut final_score: Score = 1. + bonus;

        for consideration in &self.considerations {
            // The product is monotonically non-increasing from here on, so
            // once it cannot beat the cutoff there is no point continuing.
            if final_score <= 0. || final_score < cutoff {
                final_score = 0.;
                break;
            }

            let raw = (consideration.score)(world, ctx);
            let (input, response) = match raw {
                Some(value) if value.is_finite() => {
                    let input =
                        ((value - consideration.min) / (consideration.max - consideration.min))
                            .clamp(0., 1.);
                    (input, consideration.curve.sample_safe(input))
                }
                // A None or non-finite raw score is a non-fatal scoring fault;
                // the candidate reads as worthless rather than poisoning the
                // product with NaN.
                _ => {
                    #[cfg(feature = "logging")]
                    tracing::warn!(
                        decision = decision_name,
                        consideration = consideration.name.as_str(),
                        "consideration produced no usable score"
                    );
                    (0., 0.)
                }
            };

            trace.consideration_scored(
                decision_name,
                consideration.name.as_str(),
                input,
                response,
                &consideration.curve_desc,
            );

            if response == 0. {
                final_score = 0.;
                break;
            }

            let makeup = (1. - response) * self.mod_factor;
            let scaled = response + makeup * response;
            final_score *= clamp01(scaled);
        }

        final_score
    }
}
