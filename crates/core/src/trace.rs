//! Diagnostic traces for the scoring pass.
//!
//! A [`DecisionTrace`] is a passive observer hooked into every requirement
//! check, consideration evaluation, and final score per (Decision, Context)
//! candidate, plus the top-level winner per tick. It is injected, not
//! hardwired, so the scoring algorithm stays independently testable and the
//! zero-observer case costs nothing.
//!
//! Serializing a recorded trace (to JSON, a debug UI, whatever) is the
//! consumer's business, not this crate's.

use std::time::Duration;

use crate::types::Score;

/// Observer hooks for one scoring pass. All hooks default to no-ops;
/// implement only what you care about.
pub trait DecisionTrace {
    /// A Requirement was checked for a candidate. On a failing requirement
    /// this is the last event recorded for that candidate - later
    /// requirements are never evaluated, so they never appear.
    fn requirement_checked(&mut self, _decision: &str, _requirement: &str, _passed: bool) {}

    /// A Consideration was evaluated: `input` is the rescaled raw score fed
    /// into the curve, `response` what the curve produced.
    fn consideration_scored(
        &mut self,
        _decision: &str,
        _consideration: &str,
        _input: Score,
        _response: Score,
        _curve: &str,
    ) {
    }

    /// A full (Decision, Context) evaluation finished with `score`.
    fn evaluation_finished(&mut self, _decision: &str, _score: Score, _elapsed: Duration) {}

    /// The tick's winner.
    fn decision_selected(&mut self, _decision: &str, _score: Score) {}
}

/// The zero-cost trace for production ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl DecisionTrace for NoTrace {}

/// One recorded observation. See the [`DecisionTrace`] hooks for field meanings.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    RequirementChecked {
        decision: String,
        requirement: String,
        passed: bool,
    },
    ConsiderationScored {
        decision: String,
        consideration: String,
        input: Score,
        response: Score,
        curve: String,
    },
    EvaluationFinished {
        decision: String,
        score: Score,
        elapsed: Duration,
    },
    DecisionSelected {
        decision: String,
        score: Score,
    },
}

/// An in-memory recorder of everything the scoring pass observed.
///
/// Mainly intended for debug overlays and tests; remember to `clear()` it
/// between ticks if you keep one around long-term, it grows without bound.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    events: Vec<TraceEvent>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The requirement checks recorded for a given decision, in order.
    pub fn requirement_checks(&self, decision: &str) -> Vec<(&str, bool)> {
        self.events
            .iter()
            .filter_map(|evt| match evt {
                TraceEvent::RequirementChecked {
                    decision: d,
                    requirement,
                    passed,
                } if d == decision => Some((requirement.as_str(), *passed)),
                _ => None,
            })
            .collect()
    }

    /// The consideration names recorded for a given decision, in order.
    pub fn considerations_evaluated(&self, decision: &str) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|evt| match evt {
                TraceEvent::ConsiderationScored {
                    decision: d,
                    consideration,
                    ..
                } if d == decision => Some(consideration.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recent winner recorded, if any.
    pub fn last_selected(&self) -> Option<(&str, Score)> {
        self.events.iter().rev().find_map(|evt| match evt {
            TraceEvent::DecisionSelected { decision, score } => {
                Some((decision.as_str(), *score))
            }
            _ => None,
        })
    }
}

impl DecisionTrace for DecisionLog {
    fn requirement_checked(&mut self, decision: &str, requirement: &str, passed: bool) {
        self.events.push(TraceEvent::RequirementChecked {
            decision: decision.to_string(),
            requirement: requirement.to_string(),
            passed,
        });
    }

    fn consideration_scored(
        &mut self,
        decision: &str,
        consideration: &str,
        input: Score,
        response: Score,
        curve: &str,
    ) {
        self.events.push(TraceEvent::ConsiderationScored {
            decision: decision.to_string(),
            consideration: consideration.to_string(),
            input,
            response,
            curve: curve.to_string(),
        });
    }

    fn evaluation_finished(&mut self, decision: &str, score: Score, elapsed: Duration) {
        self.events.push(TraceEvent::EvaluationFinished {
            decision: decision.to_string(),
            score,
            elapsed,
        });
    }

    fn decision_selected(&mut self, decision: &str, score: Score) {
        self.events.push(TraceEvent::DecisionSelected {
            decision: decision.to_string(),
            score,
        });
    }
}
