#![doc = include_str!("../README.md")]

pub use medulla_core::*;

pub mod prelude {
    pub use medulla_core::*;
    pub use medulla_core::types::*;
    pub use medulla_core::actions::{Action, ActionStatus};
    pub use medulla_core::action_state::ActionState;
    pub use medulla_core::considerations::{ConsiderationSpec, RequirementSpec};
    pub use medulla_core::context::{Context, ContextValue, Point, TargetData};
    pub use medulla_core::controller::{IntelligenceController, ReconsiderPolicy};
    pub use medulla_core::curves::{CurveRegistry, ResponseCurve, UtilityCurve};
    pub use medulla_core::decision::{DecisionData, DecisionPackage, DecisionPackageData};
    pub use medulla_core::entity::{EntityHandle, EntityId};
    pub use medulla_core::registry::Registries;
    pub use medulla_core::trace::{DecisionLog, DecisionTrace, NoTrace};

    #[cfg(feature = "package_loader")]
    pub use medulla_package_loader;
}
