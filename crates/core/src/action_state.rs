/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Lifecycle states for a running Action instance.

/// Where an ActiveAction is in its lifecycle.
///
/// The legal transitions are:
///
/// `Ready -> Running -> {Succeeded | Failed | Cancelled}`
///
/// plus `Ready -> Cancelled` for actions interrupted before their first
/// update. Terminal states never transition out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActionState {
    /// Instantiated, `on_start` not called yet.
    #[default]
    Ready,
    /// Started and receiving `on_update` calls.
    Running,
    /// Finished on its own terms; `on_success` has run.
    Succeeded,
    /// Finished by reporting failure; `on_failure` has run.
    Failed,
    /// Stopped from outside before finishing; `on_cancel` has run.
    Cancelled,
}

impl ActionState {
    pub fn is_initial(&self) -> bool {
        matches!(self, ActionState::Ready)
    }

    /// Terminal states receive no further callbacks of any kind.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ActionState::Succeeded | ActionState::Failed | ActionState::Cancelled
        )
    }

    pub fn should_process(&self) -> bool {
        matches!(self, ActionState::Ready | ActionState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_predicates() {
        assert!(ActionState::Ready.is_initial());
        assert!(ActionState::Ready.should_process());
        assert!(!ActionState::Ready.is_terminal());

        assert!(ActionState::Running.should_process());
        assert!(!ActionState::Running.is_terminal());

        for terminal in [
            ActionState::Succeeded,
            ActionState::Failed,
            ActionState::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.should_process());
            assert!(!terminal.is_initial());
        }
    }
}
