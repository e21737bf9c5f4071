//! One-stop bundle of all lookup tables needed to resolve authored
//! decision data into runnable form.

use crate::actions::ActionRegistry;
use crate::collectors::CollectorRegistry;
use crate::considerations::{ConsiderationRegistry, RequirementRegistry};
use crate::curves::CurveRegistry;

/// Everything `DecisionPackageData::resolve` needs in one place.
///
/// Fill these at startup, before loading any packages. The registries are
/// plain public fields; there is no magic in how they get populated.
pub struct Registries<W> {
    pub considerations: ConsiderationRegistry<W>,
    pub requirements: RequirementRegistry<W>,
    pub collectors: CollectorRegistry<W>,
    pub curves: CurveRegistry,
    pub actions: ActionRegistry<W>,
}

impl<W> Default for Registries<W> {
    fn default() -> Self {
        Self {
            considerations: ConsiderationRegistry::default(),
            requirements: RequirementRegistry::default(),
            collectors: CollectorRegistry::default(),
            curves: CurveRegistry::default(),
            actions: ActionRegistry::default(),
        }
    }
}

impl<W> Registries<W> {
    pub fn new() -> Self {
        Self::default()
    }
}
