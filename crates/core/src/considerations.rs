//! Considerations and Requirements - the scoring factors and boolean gates
//! a DecisionEvaluator is built from.
//!
//! The authored data model refers to scoring functions by string key; the
//! actual functions live in registries that user code fills at startup. The
//! keys are resolved exactly once, when a DecisionPackage is resolved, so a
//! bad key is an authoring error surfaced at load time rather than a scoring
//! surprise at runtime.
//!
//! Both function kinds must be pure with respect to the Context (and any
//! read-only world state): they may be called many times per tick across
//! different candidate Contexts, and the engine assumes repeat calls are safe.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::identifiers::{ConsiderationId, CurveId, RequirementId};
use crate::types::Score;

#[cfg(feature = "package_loader")]
use serde::{Deserialize, Serialize};

/// A scoring function over a Context (and a read-only world).
///
/// Returns the *raw* score - an arbitrary float that still has to go through
/// min/max rescaling and the decision's Curve. A `None` return signifies
/// something went wrong but it is not worth crashing over (e.g. the Context
/// did not satisfy an invariant the collector was supposed to guarantee);
/// it reads as a zero response and eliminates the candidate.
pub type ConsiderationFn<W> = dyn Fn(&W, &Context) -> Option<Score> + Send + Sync;

/// A boolean precondition over a Context (and a read-only world).
/// Any failing Requirement disqualifies the candidate outright.
pub type RequirementFn<W> = dyn Fn(&W, &Context) -> bool + Send + Sync;

/// Authored data for one Consideration slot on a Decision.
///
/// Raw scores get remapped from `[min, max]` to the unit interval before the
/// Curve is applied; values outside the range saturate to the nearer bound.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "package_loader", derive(Serialize, Deserialize))]
pub struct ConsiderationSpec {
    #[cfg_attr(feature = "package_loader", serde(rename = "consideration"))]
    pub func_name: ConsiderationId,

    #[cfg_attr(feature = "package_loader", serde(rename = "curve"))]
    pub curve_name: CurveId,

    pub min: Score,
    pub max: Score,
}

impl ConsiderationSpec {
    pub fn new<C: Into<ConsiderationId>, K: Into<CurveId>>(
        func_name: C,
        curve_name: K,
        min: Score,
        max: Score,
    ) -> Self {
        Self {
            func_name: func_name.into(),
            curve_name: curve_name.into(),
            min,
            max,
        }
    }
}

/// Authored data for one Requirement slot on a Decision.
///
/// Requirement order matters for performance, not correctness - all must
/// pass, but evaluation stops at the first failure, so put cheap and
/// frequently-failing checks first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "package_loader", derive(Serialize, Deserialize))]
pub struct RequirementSpec {
    #[cfg_attr(feature = "package_loader", serde(rename = "requirement"))]
    pub func_name: RequirementId,

    #[cfg_attr(feature = "package_loader", serde(default))]
    pub description: Option<String>,
}

impl RequirementSpec {
    pub fn new<R: Into<RequirementId>>(func_name: R) -> Self {
        Self {
            func_name: func_name.into(),
            description: None,
        }
    }

    pub fn with_description<R: Into<RequirementId>, D: Into<String>>(
        func_name: R,
        description: D,
    ) -> Self {
        Self {
            func_name: func_name.into(),
            description: Some(description.into()),
        }
    }
}

/// Maps Consideration keys to registered scoring functions.
pub struct ConsiderationRegistry<W> {
    mapping: HashMap<ConsiderationId, Arc<ConsiderationFn<W>>>,
}

impl<W> Default for ConsiderationRegistry<W> {
    fn default() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }
}

impl<W> ConsiderationRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, key: impl Into<ConsiderationId>, func: F) -> &mut Self
    where
        F: Fn(&W, &Context) -> Option<Score> + Send + Sync + 'static,
    {
        let key = key.into();
        let old = self.mapping.insert(key, Arc::new(func));
        if old.is_some() {
            #[cfg(feature = "logging")]
            tracing::warn!("consideration key collision; ejecting previous registration");
        }
        self
    }

    pub fn resolve(&self, key: &ConsiderationId) -> Option<Arc<ConsiderationFn<W>>> {
        self.mapping.get(key).cloned()
    }
}

/// Maps Requirement keys to registered predicates.
pub struct RequirementRegistry<W> {
    mapping: HashMap<RequirementId, Arc<RequirementFn<W>>>,
}

impl<W> Default for RequirementRegistry<W> {
    fn default() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }
}

impl<W> RequirementRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, key: impl Into<RequirementId>, func: F) -> &mut Self
    where
        F: Fn(&W, &Context) -> bool + Send + Sync + 'static,
    {
        let key = key.into();
        let old = self.mapping.insert(key, Arc::new(func));
        if old.is_some() {
            #[cfg(feature = "logging")]
            tracing::warn!("requirement key collision; ejecting previous registration");
        }
        self
    }

    pub fn resolve(&self, key: &RequirementId) -> Option<Arc<RequirementFn<W>>> {
        self.mapping.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;

    struct World {
        health: Score,
    }

    #[test]
    fn registered_functions_resolve_and_run() {
        let mut considerations = ConsiderationRegistry::<World>::new();
        considerations.register("my_health", |world: &World, _ctx: &Context| {
            Some(world.health)
        });

        let mut requirements = RequirementRegistry::<World>::new();
        requirements.register("is_hurt", |world: &World, _ctx: &Context| world.health < 1.);

        let world = World { health: 0.4 };
        let ctx = Context::for_self(EntityId(1));

        let cons = considerations
            .resolve(&ConsiderationId::from("my_health"))
            .unwrap();
        assert_eq!(cons(&world, &ctx), Some(0.4));

        let req = requirements.resolve(&RequirementId::from("is_hurt")).unwrap();
        assert!(req(&world, &ctx));

        assert!(considerations
            .resolve(&ConsiderationId::from("no_such"))
            .is_none());
    }
}
