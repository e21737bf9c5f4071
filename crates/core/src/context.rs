//! Contexts - the transient, per-candidate data that Considerations and
//! Requirements are evaluated against.
//!
//! A Context is an (owner, target, properties) triple. The owner is the AI
//! entity being scored for; the target is whatever the candidate is *about*
//! (an enemy, a waypoint, a patrol route, or nothing for self-directed
//! behaviors like Idle or Heal-Self).
//!
//! Target shapes are a closed tagged union rather than a downcast-able class
//! hierarchy: a Consideration that needs a point asks `target_point()` and
//! gets a None for an entity-shaped Context instead of a silent bad cast.
//!
//! Contexts are created fresh by a ContextCollector for every evaluation
//! pass and discarded after selection; only the winning Context survives,
//! owned by the running Action for the duration of its run.

use std::collections::HashMap;

use crate::entity::EntityId;
use crate::types::Score;

/// A position in world space. The engine does no geometry with it;
/// it is cargo for the user's collectors and considerations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32, f32)> for Point {
    fn from(value: (f32, f32, f32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// What a candidate Context is aimed at.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TargetData {
    /// Self-directed; the owner is the only participant.
    #[default]
    None,
    Entity(EntityId),
    Point(Point),
    Entities(Vec<EntityId>),
    Points(Vec<Point>),
}

/// A single named value carried in a Context's property bag.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Bool(bool),
    I32(i32),
    F32(f32),
    Str(String),
    Entity(EntityId),
    Point(Point),
}

impl ContextValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<f32> for ContextValue {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<EntityId> for ContextValue {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}

impl From<Point> for ContextValue {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

/// One candidate's worth of evaluation data.
#[derive(Debug, Clone, Default)]
pub struct Context {
    owner: EntityId,
    target: TargetData,
    properties: HashMap<String, ContextValue>,
}

impl Context {
    /// A Context about the owner itself (Idle, Heal-Self, Flee, ...).
    pub fn for_self(owner: EntityId) -> Self {
        Self {
            owner,
            target: TargetData::None,
            properties: HashMap::new(),
        }
    }

    pub fn with_target_entity(owner: EntityId, target: EntityId) -> Self {
        Self {
            owner,
            target: TargetData::Entity(target),
            properties: HashMap::new(),
        }
    }

    pub fn with_target_point(owner: EntityId, point: Point) -> Self {
        Self {
            owner,
            target: TargetData::Point(point),
            properties: HashMap::new(),
        }
    }

    pub fn with_target_entities(owner: EntityId, targets: Vec<EntityId>) -> Self {
        Self {
            owner,
            target: TargetData::Entities(targets),
            properties: HashMap::new(),
        }
    }

    pub fn with_target_points(owner: EntityId, points: Vec<Point>) -> Self {
        Self {
            owner,
            target: TargetData::Points(points),
            properties: HashMap::new(),
        }
    }

    /// Builder-style property attachment for collectors that want to
    /// precompute values (distances, counts) once per candidate.
    pub fn with_property<K: Into<String>, V: Into<ContextValue>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn set<K: Into<String>, V: Into<ContextValue>>(&mut self, key: K, value: V) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn target(&self) -> &TargetData {
        &self.target
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.properties.get(key)
    }

    pub fn get_f32(&self, key: &str) -> Option<Score> {
        self.properties.get(key).and_then(ContextValue::as_f32)
    }

    /// The single target entity, if this Context is entity-shaped.
    pub fn target_entity(&self) -> Option<EntityId> {
        match &self.target {
            TargetData::Entity(e) => Some(*e),
            _ => None,
        }
    }

    /// The single target point, if this Context is point-shaped.
    pub fn target_point(&self) -> Option<Point> {
        match &self.target {
            TargetData::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn target_entities(&self) -> Option<&[EntityId]> {
        match &self.target {
            TargetData::Entities(es) => Some(es.as_slice()),
            _ => None,
        }
    }

    pub fn target_points(&self) -> Option<&[Point]> {
        match &self.target {
            TargetData::Points(ps) => Some(ps.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_self_directed_for_the_zero_entity() {
        let ctx = Context::default();
        assert_eq!(ctx.owner(), EntityId(0));
        assert_eq!(ctx.target(), &TargetData::None);
    }

    #[test]
    fn shape_accessors_refuse_mismatched_shapes() {
        let ctx = Context::with_target_entity(EntityId(1), EntityId(2));
        assert_eq!(ctx.target_entity(), Some(EntityId(2)));
        assert_eq!(ctx.target_point(), None);
        assert_eq!(ctx.target_entities(), None);

        let ctx = Context::with_target_point(EntityId(1), Point::new(1., 2., 3.));
        assert_eq!(ctx.target_entity(), None);
        assert_eq!(ctx.target_point(), Some(Point::new(1., 2., 3.)));
    }

    #[test]
    fn properties_round_trip_by_type() {
        let ctx = Context::for_self(EntityId(1))
            .with_property("distance", 4.5f32)
            .with_property("hostile", true)
            .with_property("label", "east gate");

        assert_eq!(ctx.get_f32("distance"), Some(4.5));
        assert_eq!(ctx.get("hostile").and_then(ContextValue::as_bool), Some(true));
        assert_eq!(ctx.get("label").and_then(ContextValue::as_str), Some("east gate"));
        // Wrong-typed reads are None, not panics.
        assert_eq!(ctx.get("hostile").and_then(ContextValue::as_f32), None);
        assert_eq!(ctx.get("missing"), None);
    }
}
