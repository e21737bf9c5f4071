/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/
//! Opaque entity identity.
//!
//! The engine never owns game entities; it only passes their ids back into
//! user-provided functions (collectors, considerations, actions) that know
//! how to look them up in whatever world representation the host uses.

/// An opaque id for a game entity.
///
/// The engine treats this as a pure token; what it indexes into is the host's business.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A convenient type wrapping an EntityId with an optional Name.
/// Acts as either an id or a Name for Display purposes based on what it holds.
/// Otherwise acts as an EntityId for any other purpose.
#[derive(Debug, Clone)]
pub enum EntityHandle {
    Id(EntityId),
    IdAndName(EntityId, String),
}

impl EntityHandle {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Id(e) => *e,
            Self::IdAndName(e, _) => *e,
        }
    }
}

impl From<EntityId> for EntityHandle {
    fn from(value: EntityId) -> Self {
        Self::Id(value)
    }
}

impl From<(EntityId, String)> for EntityHandle {
    fn from(value: (EntityId, String)) -> Self {
        Self::IdAndName(value.0, value.1)
    }
}

impl core::ops::Deref for EntityHandle {
    type Target = EntityId;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Id(e) => e,
            Self::IdAndName(e, _) => e,
        }
    }
}

impl core::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Id(e) => e.fmt(f),
            Self::IdAndName(_, s) => s.fmt(f),
        }
    }
}

impl core::hash::Hash for EntityHandle {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state)
    }
}

impl PartialEq for EntityHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for EntityHandle {}
