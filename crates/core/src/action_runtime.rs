//! Runtime wrapper around a single Action run.
//!
//! ActiveAction pairs an Action instance with the Context it won under and
//! enforces the callback contract: `on_start` once, `on_update` until a
//! terminal status, then exactly one outcome hook followed by exactly one
//! `on_end`. The terminal-state guard makes repeat `cancel` calls harmless.

use crate::action_state::ActionState;
use crate::actions::{Action, ActionStatus};
use crate::context::Context;
use crate::types::Score;

pub struct ActiveAction<W> {
    decision_name: String,
    context: Context,
    action: Box<dyn Action<W>>,
    state: ActionState,
    score: Score,
}

impl<W> ActiveAction<W> {
    pub fn new(
        decision_name: impl Into<String>,
        context: Context,
        action: Box<dyn Action<W>>,
        score: Score,
    ) -> Self {
        Self {
            decision_name: decision_name.into(),
            context,
            action,
            state: ActionState::Ready,
            score,
        }
    }

    pub fn decision_name(&self) -> &str {
        &self.decision_name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// The score the decision won with, kept around for momentum-style
    /// comparisons against new candidates.
    pub fn score(&self) -> Score {
        self.score
    }

    pub fn start(&mut self, world: &mut W) {
        if !self.state.is_initial() {
            return;
        }
        self.action.on_start(world, &self.context);
        self.state = ActionState::Running;
    }

    /// Drives the action one tick. Returns the state after the update so
    /// the caller can drop finished actions.
    pub fn update(&mut self, world: &mut W) -> ActionState {
        if self.state != ActionState::Running {
            return self.state;
        }
        match self.action.on_update(world, &self.context) {
            ActionStatus::Running => {}
            ActionStatus::Succeeded => {
                self.state = ActionState::Succeeded;
                self.action.on_success(world);
                self.action.on_end(world);
            }
            ActionStatus::Failed => {
                self.state = ActionState::Failed;
                self.action.on_failure(world);
                self.action.on_end(world);
            }
        }
        self.state
    }

    /// Stops the action from outside. No-op once terminal, so callers
    /// never need to track whether a cancel already happened.
    pub fn cancel(&mut self, world: &mut W) {
        if self.state.is_terminal() {
            return;
        }
        self.state = ActionState::Cancelled;
        self.action.on_cancel(world);
        self.action.on_end(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;

    // The callback counters live on the world rather than inside the action,
    // since `Action<W>: Send` and every hook gets `&mut W` anyway.
    #[derive(Default, Debug, PartialEq)]
    struct Calls {
        start: u32,
        update: u32,
        success: u32,
        failure: u32,
        cancel: u32,
        end: u32,
    }

    struct ScriptedAction {
        results: Vec<ActionStatus>,
    }

    impl Action<Calls> for ScriptedAction {
        fn on_start(&mut self, world: &mut Calls, _ctx: &Context) {
            world.start += 1;
        }
        fn on_update(&mut self, world: &mut Calls, _ctx: &Context) -> ActionStatus {
            world.update += 1;
            self.results.remove(0)
        }
        fn on_success(&mut self, world: &mut Calls) {
            world.success += 1;
        }
        fn on_failure(&mut self, world: &mut Calls) {
            world.failure += 1;
        }
        fn on_cancel(&mut self, world: &mut Calls) {
            world.cancel += 1;
        }
        fn on_end(&mut self, world: &mut Calls) {
            world.end += 1;
        }
    }

    fn scripted(results: Vec<ActionStatus>) -> ActiveAction<Calls> {
        ActiveAction::new(
            "test_decision",
            Context::for_self(EntityId(1)),
            Box::new(ScriptedAction { results }),
            1.,
        )
    }

    #[test]
    fn success_path_runs_each_hook_once() {
        let mut active = scripted(vec![ActionStatus::Running, ActionStatus::Succeeded]);
        let mut world = Calls::default();

        active.start(&mut world);
        assert_eq!(active.update(&mut world), ActionState::Running);
        assert_eq!(active.update(&mut world), ActionState::Succeeded);

        // Further updates and cancels are inert once terminal.
        assert_eq!(active.update(&mut world), ActionState::Succeeded);
        active.cancel(&mut world);

        assert_eq!(
            world,
            Calls {
                start: 1,
                update: 2,
                success: 1,
                failure: 0,
                cancel: 0,
                end: 1,
            }
        );
    }

    #[test]
    fn failure_path_runs_each_hook_once() {
        let mut active = scripted(vec![ActionStatus::Failed]);
        let mut world = Calls::default();

        active.start(&mut world);
        assert_eq!(active.update(&mut world), ActionState::Failed);

        assert_eq!(world.failure, 1);
        assert_eq!(world.success, 0);
        assert_eq!(world.cancel, 0);
        assert_eq!(world.end, 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut active = scripted(vec![ActionStatus::Running; 4]);
        let mut world = Calls::default();

        active.start(&mut world);
        active.update(&mut world);
        active.cancel(&mut world);
        active.cancel(&mut world);
        assert_eq!(active.state(), ActionState::Cancelled);

        assert_eq!(world.cancel, 1);
        assert_eq!(world.end, 1);
    }

    #[test]
    fn cancel_before_start_still_cleans_up() {
        let mut active = scripted(vec![]);
        let mut world = Calls::default();

        active.cancel(&mut world);
        assert_eq!(active.state(), ActionState::Cancelled);

        assert_eq!(world.start, 0);
        assert_eq!(world.cancel, 1);
        assert_eq!(world.end, 1);
    }
}
