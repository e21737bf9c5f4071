/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Context collectors - the fan-out stage of decision-making.
//!
//! Each Decision names one collector; once per evaluation pass the collector
//! builds the candidate Contexts for that Decision (one Context per sensible
//! target, or a single self-Context for untargeted behaviors). Every Context
//! is scored independently, so one Decision can compete against itself
//! across targets.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::entity::EntityId;
use crate::identifiers::CollectorId;

/// Builds the candidate Contexts for one Decision and owner.
///
/// A `None` return signals the collector could not gather its data this
/// tick (e.g. a required cache is not warm yet); the engine treats it
/// like an empty set and the Decision simply fields no candidates.
pub type CollectorFn<W> = dyn Fn(&W, EntityId) -> Option<Vec<Context>> + Send + Sync;

/// Maps collector keys to registered collector functions.
pub struct CollectorRegistry<W> {
    mapping: HashMap<CollectorId, Arc<CollectorFn<W>>>,
}

impl<W> Default for CollectorRegistry<W> {
    fn default() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }
}

impl<W> CollectorRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, key: impl Into<CollectorId>, func: F) -> &mut Self
    where
        F: Fn(&W, EntityId) -> Option<Vec<Context>> + Send + Sync + 'static,
    {
        let key = key.into();
        let old = self.mapping.insert(key, Arc::new(func));
        if old.is_some() {
            #[cfg(feature = "logging")]
            tracing::warn!("collector key collision; ejecting previous registration");
        }
        self
    }

    pub fn resolve(&self, key: &CollectorId) -> Option<Arc<CollectorFn<W>>> {
        self.mapping.get(key).cloned()
    }
}
