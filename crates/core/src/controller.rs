/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The per-agent brain: gathers candidates, scores them, runs the winner.
//!
//! One IntelligenceController per agent. Each `tick()` optionally re-selects
//! the best (Decision, Context) pair across the whole package, then drives
//! the current action one step. Selection keeps a running best score as the
//! pruning cutoff and pushes survivors into a reusable binary heap, so the
//! winner pops out in O(log n) without a full sort.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::action_runtime::ActiveAction;
use crate::context::Context;
use crate::decision::{Decision, DecisionPackage};
use crate::entity::EntityHandle;
use crate::trace::DecisionTrace;
use crate::types::Score;

/// How often the controller re-runs candidate selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconsiderPolicy {
    /// Re-select every tick; the most reactive and the most expensive.
    #[default]
    EveryTick,
    /// Only select when no action is running. Actions always finish
    /// (or fail) before anything else gets a look-in.
    WhenIdle,
    /// Re-select when idle, or after this many ticks on the same action.
    Interval(u32),
}

/// Optional selection bias based on what is already running.
///
/// Called as `(current_decision_name, candidate_decision_name) -> bonus`;
/// the bonus seeds the candidate's score above 1.0, so returning a small
/// positive value for the current decision adds stickiness and damps
/// oscillation between near-tied behaviors.
pub type MomentumFn = dyn Fn(Option<&str>, &str) -> Score + Send + Sync;

/// Max-heap entry; the heap pops the highest weighted score first.
struct Candidate<W> {
    sort_key: Score,
    score: Score,
    decision: Arc<Decision<W>>,
    context: Context,
}

impl<W> Candidate<W> {
    fn new(score: Score, decision: Arc<Decision<W>>, context: Context) -> Self {
        Self {
            // Keyed by `1 - score` so the heap pops the highest score first.
            // Equal scores pop in unspecified order.
            sort_key: 1.0 - score,
            score,
            decision,
            context,
        }
    }
}

impl<W> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key == other.sort_key
    }
}

impl<W> Eq for Candidate<W> {}

impl<W> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the smallest sort_key (highest score) wins the heap.
        // Scores are clamped finite by scoring, so the fallback never
        // decides a real comparison.
        other
            .sort_key
            .partial_cmp(&self.sort_key)
            .unwrap_or(Ordering::Equal)
    }
}

/// Drives one agent's decision-making against a shared DecisionPackage.
pub struct IntelligenceController<W> {
    entity: EntityHandle,
    package: Arc<DecisionPackage<W>>,
    current: Option<ActiveAction<W>>,
    candidates: BinaryHeap<Candidate<W>>,
    momentum: Option<Arc<MomentumFn>>,
    policy: ReconsiderPolicy,
    ticks_since_selection: u32,
}

impl<W> IntelligenceController<W> {
    pub fn new(entity: EntityHandle, package: Arc<DecisionPackage<W>>) -> Self {
        let capacity = package.decisions.len().max(8);
        Self {
            entity,
            package,
            current: None,
            candidates: BinaryHeap::with_capacity(capacity),
            momentum: None,
            policy: ReconsiderPolicy::default(),
            ticks_since_selection: 0,
        }
    }

    pub fn with_momentum<F>(mut self, momentum: F) -> Self
    where
        F: Fn(Option<&str>, &str) -> Score + Send + Sync + 'static,
    {
        self.momentum = Some(Arc::new(momentum));
        self
    }

    pub fn with_reconsider_policy(mut self, policy: ReconsiderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn entity(&self) -> &EntityHandle {
        &self.entity
    }

    /// Name of the decision currently being acted on, if any.
    pub fn current_decision(&self) -> Option<&str> {
        self.current.as_ref().map(|active| active.decision_name())
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// One full brain step: maybe re-select, then drive the current action.
    pub fn tick(&mut self, world: &mut W, trace: &mut dyn DecisionTrace) {
        self.ticks_since_selection = self.ticks_since_selection.saturating_add(1);
        if self.should_select() {
            self.select(world, trace);
            self.ticks_since_selection = 0;
        }

        // Take the action out of its slot while callbacks run, so a panic
        // inside user code cannot leave a half-updated action behind.
        if let Some(mut active) = self.current.take() {
            let state = active.update(world);
            if !state.is_terminal() {
                self.current = Some(active);
            }
        }
    }

    /// Cancels the running action immediately, leaving the agent idle.
    pub fn interrupt(&mut self, world: &mut W) {
        if let Some(mut active) = self.current.take() {
            active.cancel(world);
        }
    }

    fn should_select(&self) -> bool {
        match self.policy {
            ReconsiderPolicy::EveryTick => true,
            ReconsiderPolicy::WhenIdle => self.current.is_none(),
            ReconsiderPolicy::Interval(ticks) => {
                self.current.is_none() || self.ticks_since_selection >= ticks
            }
        }
    }

    fn select(&mut self, world: &mut W, trace: &mut dyn DecisionTrace) {
        let current_name = self
            .current
            .as_ref()
            .map(|active| active.decision_name().to_owned());

        let mut cutoff: Score = 0.;
        let package = Arc::clone(&self.package);

        for decision in &package.decisions {
            let contexts = decision.collect(&*world, self.entity.id());
            for context in contexts {
                let bonus = match &self.momentum {
                    Some(momentum) => momentum(current_name.as_deref(), &decision.name),
                    None => 0.,
                };
                let score = decision.score(&*world, &context, bonus, cutoff, trace);
                if score > cutoff {
                    cutoff = score;
                }
                if score > 0. {
                    self.candidates
                        .push(Candidate::new(score, Arc::clone(decision), context));
                }
            }
        }

        let winner = self.candidates.pop();
        self.candidates.clear();

        let Some(winner) = winner else {
            // Nothing viable this tick; keep whatever is running.
            return;
        };

        trace.decision_selected(&winner.decision.name, winner.score);

        // Re-selecting the same decision keeps the running action instead
        // of restarting it.
        if current_name.as_deref() == Some(winner.decision.name.as_str()) {
            return;
        }

        if let Some(mut previous) = self.current.take() {
            previous.cancel(world);
        }
        #[cfg(feature = "logging")]
        tracing::debug!(
            entity = %self.entity,
            decision = winner.decision.name.as_str(),
            score = winner.score,
            "decision selected"
        );

        let mut active = ActiveAction::new(
            winner.decision.name.clone(),
            winner.context,
            (winner.decision.action_factory)(),
            winner.score,
        );
        active.start(world);
        self.current = Some(active);
    }
}
