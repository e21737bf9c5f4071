//! Error types for configuration-time failures.
//!
//! The split here is deliberate: anything wrong with *authored data* (bad keys,
//! bad numbers) surfaces loudly when a DecisionPackage is resolved, while
//! anything that goes wrong *mid-scoring* is demoted to "this candidate loses"
//! so the controller always produces a decision (or an explicit idle) each tick.

use crate::types::Score;

/// A failure while resolving authored DecisionPackage data against the
/// registered functions, curves, and action factories.
///
/// These indicate an authoring mistake, not a runtime condition; a package
/// that resolves cleanly cannot produce any of these during scoring.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("decision '{decision}' references unknown curve '{curve}'")]
    UnknownCurve { decision: String, curve: String },

    #[error("decision '{decision}' references unknown consideration '{consideration}'")]
    UnknownConsideration {
        decision: String,
        consideration: String,
    },

    #[error("decision '{decision}' references unknown requirement '{requirement}'")]
    UnknownRequirement {
        decision: String,
        requirement: String,
    },

    #[error("decision '{decision}' references unknown context collector '{collector}'")]
    UnknownCollector { decision: String, collector: String },

    #[error("decision '{decision}' references unknown action key '{action_key}'")]
    UnknownAction {
        decision: String,
        action_key: String,
    },

    #[error(
        "decision '{decision}', consideration '{consideration}': min/max range [{min}, {max}] is not finite or is degenerate"
    )]
    InvalidRange {
        decision: String,
        consideration: String,
        min: Score,
        max: Score,
    },

    #[error("decision '{decision}': weight {weight} must be finite and positive")]
    InvalidWeight { decision: String, weight: Score },
}

/// A failure while registering something into one of the registries.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("curve key '{0}' collides with a built-in curve name")]
    BuiltinCurveCollision(String),
}
