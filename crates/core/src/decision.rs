/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Decisions and DecisionPackages, in both authored and resolved form.
//!
//! The authored structs (`DecisionData`, `DecisionPackageData`) are plain
//! data: string keys only, deserializable from any format a loader backend
//! supports. `resolve()` swaps every key for the registered function or
//! curve it names and returns the runnable form, failing fast on the first
//! authoring mistake.

use std::sync::Arc;
use std::time::Instant;

use crate::actions::ActionFactoryFn;
use crate::collectors::CollectorFn;
use crate::considerations::{
    ConsiderationFn, ConsiderationSpec, RequirementFn, RequirementSpec,
};
use crate::context::Context;
use crate::curves::UtilityCurve;
use crate::entity::EntityId;
use crate::errors::PackageError;
use crate::evaluator::DecisionEvaluator;
use crate::identifiers::{CollectorId, ConsiderationId, RequirementId};
use crate::registry::Registries;
use crate::trace::DecisionTrace;
use crate::types::{ActionKey, Score};

#[cfg(feature = "package_loader")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "package_loader")]
fn default_weight() -> Score {
    1.
}

/// Authored data for one Decision.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "package_loader", derive(Serialize, Deserialize))]
pub struct DecisionData {
    pub name: String,

    /// Key of the Action factory to instantiate if this Decision wins.
    pub action_key: ActionKey,

    #[cfg_attr(feature = "package_loader", serde(rename = "context_collector"))]
    pub collector_name: CollectorId,

    #[cfg_attr(feature = "package_loader", serde(default))]
    pub requirements: Vec<RequirementSpec>,

    #[cfg_attr(feature = "package_loader", serde(default))]
    pub considerations: Vec<ConsiderationSpec>,

    /// Static multiplier layering decisions into priority bands.
    /// Must be finite and positive; defaults to 1.
    #[cfg_attr(feature = "package_loader", serde(default = "default_weight"))]
    pub weight: Score,
}

impl DecisionData {
    pub fn new(
        name: impl Into<String>,
        action_key: impl Into<ActionKey>,
        collector_name: impl Into<CollectorId>,
    ) -> Self {
        Self {
            name: name.into(),
            action_key: action_key.into(),
            collector_name: collector_name.into(),
            requirements: Vec::new(),
            considerations: Vec::new(),
            weight: 1.,
        }
    }

    pub fn with_requirement(mut self, spec: RequirementSpec) -> Self {
        self.requirements.push(spec);
        self
    }

    pub fn with_consideration(mut self, spec: ConsiderationSpec) -> Self {
        self.considerations.push(spec);
        self
    }

    pub fn with_weight(mut self, weight: Score) -> Self {
        self.weight = weight;
        self
    }
}

/// Authored data for a whole behavior set, as loaded from a file or built
/// in code.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "package_loader", derive(Serialize, Deserialize))]
pub struct DecisionPackageData {
    pub name: String,
    pub decisions: Vec<DecisionData>,
}

impl DecisionPackageData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decisions: Vec::new(),
        }
    }

    pub fn with_decision(mut self, decision: DecisionData) -> Self {
        self.decisions.push(decision);
        self
    }

    /// Resolves every string key in the package against the registries,
    /// producing the runnable form.
    ///
    /// A `min > max` consideration range is treated as an authoring slip and
    /// flipped; a degenerate or non-finite range is an error. Weights must
    /// be finite and positive.
    pub fn resolve<W>(&self, registries: &Registries<W>) -> Result<DecisionPackage<W>, PackageError> {
        let mut decisions = Vec::with_capacity(self.decisions.len());

        for data in &self.decisions {
            if !data.weight.is_finite() || data.weight <= 0. {
                return Err(PackageError::InvalidWeight {
                    decision: data.name.clone(),
                    weight: data.weight,
                });
            }

            let collector = registries
                .collectors
                .resolve(&data.collector_name)
                .ok_or_else(|| PackageError::UnknownCollector {
                    decision: data.name.clone(),
                    collector: data.collector_name.to_string(),
                })?;

            let action_factory = registries
                .actions
                .resolve(&data.action_key)
                .ok_or_else(|| PackageError::UnknownAction {
                    decision: data.name.clone(),
                    action_key: data.action_key.clone(),
                })?;

            let mut requirements = Vec::with_capacity(data.requirements.len());
            for spec in &data.requirements {
                let check = registries
                    .requirements
                    .resolve(&spec.func_name)
                    .ok_or_else(|| PackageError::UnknownRequirement {
                        decision: data.name.clone(),
                        requirement: spec.func_name.to_string(),
                    })?;
                requirements.push(ResolvedRequirement {
                    name: spec.func_name.clone(),
                    check,
                });
            }

            let mut considerations = Vec::with_capacity(data.considerations.len());
            for spec in &data.considerations {
                let score = registries
                    .considerations
                    .resolve(&spec.func_name)
                    .ok_or_else(|| PackageError::UnknownConsideration {
                        decision: data.name.clone(),
                        consideration: spec.func_name.to_string(),
                    })?;

                let curve = registries.curves.resolve(&spec.curve_name).ok_or_else(|| {
                    PackageError::UnknownCurve {
                        decision: data.name.clone(),
                        curve: spec.curve_name.to_string(),
                    }
                })?;

                let (mut min, mut max) = (spec.min, spec.max);
                if !min.is_finite() || !max.is_finite() || min == max {
                    return Err(PackageError::InvalidRange {
                        decision: data.name.clone(),
                        consideration: spec.func_name.to_string(),
                        min,
                        max,
                    });
                }
                if min > max {
                    #[cfg(feature = "logging")]
                    tracing::warn!(
                        decision = data.name.as_str(),
                        consideration = spec.func_name.as_str(),
                        "consideration range is inverted, flipping"
                    );
                    std::mem::swap(&mut min, &mut max);
                }

                let curve_desc = curve.describe();
                considerations.push(ResolvedConsideration {
                    name: spec.func_name.clone(),
                    score,
                    curve,
                    curve_desc,
                    min,
                    max,
                });
            }

            decisions.push(Arc::new(Decision {
                name: data.name.clone(),
                action_key: data.action_key.clone(),
                weight: data.weight,
                collector,
                action_factory,
                evaluator: DecisionEvaluator::new(requirements, considerations),
            }));
        }

        Ok(DecisionPackage {
            name: self.name.clone(),
            decisions,
        })
    }
}

/// A Requirement with its predicate looked up.
pub struct ResolvedRequirement<W> {
    pub name: RequirementId,
    pub check: Arc<RequirementFn<W>>,
}

/// A Consideration with its scoring function and curve looked up and the
/// rescale range validated.
pub struct ResolvedConsideration<W> {
    pub name: ConsiderationId,
    pub score: Arc<ConsiderationFn<W>>,
    pub curve: Arc<dyn UtilityCurve>,
    /// Cached `curve.describe()`, so tracing does not re-stringify per call.
    pub curve_desc: String,
    pub min: Score,
    pub max: Score,
}

/// A fully resolved Decision, ready to collect and score candidates.
pub struct Decision<W> {
    pub name: String,
    pub action_key: ActionKey,
    pub weight: Score,
    collector: Arc<CollectorFn<W>>,
    pub action_factory: Arc<ActionFactoryFn<W>>,
    evaluator: DecisionEvaluator<W>,
}

impl<W> Decision<W> {
    /// Gathers this tick's candidate Contexts.
    ///
    /// Collector faults surface as an empty candidate set; a Decision that
    /// cannot see any targets simply sits this tick out.
    pub fn collect(&self, world: &W, owner: EntityId) -> Vec<Context> {
        match (self.collector)(world, owner) {
            Some(contexts) => contexts,
            None => {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    decision = self.name.as_str(),
                    "context collector returned nothing"
                );
                Vec::new()
            }
        }
    }

    /// Scores one candidate Context, weighted.
    ///
    /// `cutoff` is the best *weighted* score seen so far this tick. If even
    /// a perfect run (`weight * (1 + bonus)`) could not beat it, the whole
    /// evaluation is skipped; otherwise the cutoff is rescaled into this
    /// decision's unit space before pruning inside the evaluator.
    pub fn score(
        &self,
        world: &W,
        ctx: &Context,
        bonus: Score,
        cutoff: Score,
        trace: &mut dyn DecisionTrace,
    ) -> Score {
        if cutoff > 0. && self.weight * (1. + bonus) <= cutoff {
            return 0.;
        }

        let started = Instant::now();
        let product = self
            .evaluator
            .score(world, &self.name, ctx, bonus, cutoff / self.weight, trace);
        let weighted = product * self.weight;
        trace.evaluation_finished(&self.name, weighted, started.elapsed());
        weighted
    }
}

/// A resolved behavior set, shareable across any number of controllers.
pub struct DecisionPackage<W> {
    pub name: String,
    pub decisions: Vec<Arc<Decision<W>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionStatus};
    use crate::trace::NoTrace;

    struct World {
        health: Score,
    }

    struct NoopAction;

    impl Action<World> for NoopAction {
        fn on_start(&mut self, _world: &mut World, _ctx: &Context) {}
        fn on_update(&mut self, _world: &mut World, _ctx: &Context) -> ActionStatus {
            ActionStatus::Succeeded
        }
    }

    fn registries() -> Registries<World> {
        let mut registries = Registries::new();
        registries
            .considerations
            .register("my_health", |world: &World, _ctx: &Context| Some(world.health));
        registries
            .requirements
            .register("always", |_world: &World, _ctx: &Context| true);
        registries
            .collectors
            .register("self_only", |_world: &World, owner: EntityId| {
                Some(vec![Context::for_self(owner)])
            });
        registries.actions.register("noop", || Box::new(NoopAction));
        registries
    }

    fn heal_decision() -> DecisionData {
        DecisionData::new("heal", "noop", "self_only")
            .with_requirement(RequirementSpec::new("always"))
            .with_consideration(ConsiderationSpec::new("my_health", "AntiLinear", 0., 1.))
    }

    #[test]
    fn package_resolves_and_scores() {
        let registries = registries();
        let package = DecisionPackageData::new("testset")
            .with_decision(heal_decision())
            .resolve(&registries)
            .unwrap();

        assert_eq!(package.decisions.len(), 1);
        let decision = &package.decisions[0];

        let world = World { health: 0.25 };
        let contexts = decision.collect(&world, EntityId(1));
        assert_eq!(contexts.len(), 1);

        // AntiLinear over health 0.25 responds 0.75.
        let score = decision.score(&world, &contexts[0], 0., 0., &mut NoTrace);
        assert!((score - 0.75).abs() < 1e-6);
    }

    #[test]
    fn unknown_keys_fail_resolution() {
        let registries = registries();

        let bad_cons = DecisionPackageData::new("p").with_decision(
            DecisionData::new("d", "noop", "self_only")
                .with_consideration(ConsiderationSpec::new("nope", "Linear", 0., 1.)),
        );
        assert!(matches!(
            bad_cons.resolve(&registries),
            Err(PackageError::UnknownConsideration { .. })
        ));

        let bad_curve = DecisionPackageData::new("p").with_decision(
            DecisionData::new("d", "noop", "self_only")
                .with_consideration(ConsiderationSpec::new("my_health", "Wobbly", 0., 1.)),
        );
        assert!(matches!(
            bad_curve.resolve(&registries),
            Err(PackageError::UnknownCurve { .. })
        ));

        let bad_req = DecisionPackageData::new("p").with_decision(
            DecisionData::new("d", "noop", "self_only")
                .with_requirement(RequirementSpec::new("nope")),
        );
        assert!(matches!(
            bad_req.resolve(&registries),
            Err(PackageError::UnknownRequirement { .. })
        ));

        let bad_collector = DecisionPackageData::new("p")
            .with_decision(DecisionData::new("d", "noop", "nope"));
        assert!(matches!(
            bad_collector.resolve(&registries),
            Err(PackageError::UnknownCollector { .. })
        ));

        let bad_action = DecisionPackageData::new("p")
            .with_decision(DecisionData::new("d", "nope", "self_only"));
        assert!(matches!(
            bad_action.resolve(&registries),
            Err(PackageError::UnknownAction { .. })
        ));
    }

    #[test]
    fn invalid_ranges_and_weights_fail_resolution() {
        let registries = registries();

        let degenerate = DecisionPackageData::new("p").with_decision(
            DecisionData::new("d", "noop", "self_only")
                .with_consideration(ConsiderationSpec::new("my_health", "Linear", 5., 5.)),
        );
        assert!(matches!(
            degenerate.resolve(&registries),
            Err(PackageError::InvalidRange { .. })
        ));

        let non_finite = DecisionPackageData::new("p").with_decision(
            DecisionData::new("d", "noop", "self_only").with_consideration(
                ConsiderationSpec::new("my_health", "Linear", 0., Score::INFINITY),
            ),
        );
        assert!(matches!(
            non_finite.resolve(&registries),
            Err(PackageError::InvalidRange { .. })
        ));

        let zero_weight = DecisionPackageData::new("p")
            .with_decision(heal_decision().with_weight(0.));
        assert!(matches!(
            zero_weight.resolve(&registries),
            Err(PackageError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn inverted_range_is_flipped() {
        let registries = registries();
        let package = DecisionPackageData::new("p")
            .with_decision(
                DecisionData::new("d", "noop", "self_only")
                    .with_consideration(ConsiderationSpec::new("my_health", "Linear", 1., 0.)),
            )
            .resolve(&registries)
            .unwrap();

        let world = World { health: 0.25 };
        let ctx = Context::for_self(EntityId(1));
        let score = package.decisions[0].score(&world, &ctx, 0., 0., &mut NoTrace);
        assert!((score - 0.25).abs() < 1e-6);
    }

    #[test]
    fn weight_scales_scores_and_gates_ceiling() {
        let registries = registries();
        let package = DecisionPackageData::new("p")
            .with_decision(heal_decision().with_weight(2.))
            .resolve(&registries)
            .unwrap();
        let decision = &package.decisions[0];

        let world = World { health: 0.5 };
        let ctx = Context::for_self(EntityId(1));

        let score = decision.score(&world, &ctx, 0., 0., &mut NoTrace);
        assert!((score - 1.0).abs() < 1e-6);

        // A cutoff at or above the weight ceiling skips evaluation outright.
        let pruned = decision.score(&world, &ctx, 0., 2., &mut NoTrace);
        assert_eq!(pruned, 0.);
    }
}
