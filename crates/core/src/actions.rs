/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The Action trait - the behavior half of a Decision - and its registry.
//!
//! Decisions decide *what* to do; Actions do it. A Decision carries an
//! action key, and when the Decision wins a factory registered under that
//! key builds a fresh Action instance bound to the winning Context. A new
//! instance per run means Actions can carry mutable per-run state (timers,
//! progress counters) without any reset protocol.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::types::ActionKey;

/// What an Action reports back from each update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    /// Still going; call `on_update` again next tick.
    Running,
    Succeeded,
    Failed,
}

/// One concrete behavior an agent can perform.
///
/// The runtime guarantees the callback ordering documented on each method.
/// Only `on_start` and `on_update` are required; the outcome hooks default
/// to no-ops.
pub trait Action<W>: Send {
    /// Called exactly once, before the first `on_update`.
    fn on_start(&mut self, world: &mut W, ctx: &Context);

    /// Called once per tick while the action runs. Return `Running` to
    /// keep going, or a terminal status to finish.
    fn on_update(&mut self, world: &mut W, ctx: &Context) -> ActionStatus;

    /// Called once if `on_update` returned `Succeeded`.
    fn on_success(&mut self, _world: &mut W) {}

    /// Called once if `on_update` returned `Failed`.
    fn on_failure(&mut self, _world: &mut W) {}

    /// Called once if the action was stopped from outside, whether by a
    /// higher-scoring decision winning or an explicit interrupt.
    fn on_cancel(&mut self, _world: &mut W) {}

    /// Called exactly once after whichever outcome hook ran, on every path
    /// out of the action. Put cleanup here.
    fn on_end(&mut self, _world: &mut W) {}
}

/// Builds a fresh Action instance for one run.
pub type ActionFactoryFn<W> = dyn Fn() -> Box<dyn Action<W>> + Send + Sync;

/// Maps action keys to registered factories.
pub struct ActionRegistry<W> {
    mapping: HashMap<ActionKey, Arc<ActionFactoryFn<W>>>,
}

impl<W> Default for ActionRegistry<W> {
    fn default() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }
}

impl<W> ActionRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, key: impl Into<ActionKey>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Action<W>> + Send + Sync + 'static,
    {
        let key = key.into();
        let old = self.mapping.insert(key, Arc::new(factory));
        if old.is_some() {
            #[cfg(feature = "logging")]
            tracing::warn!("action key collision; ejecting previous registration");
        }
        self
    }

    pub fn resolve(&self, key: &str) -> Option<Arc<ActionFactoryFn<W>>> {
        self.mapping.get(key).cloned()
    }
}
