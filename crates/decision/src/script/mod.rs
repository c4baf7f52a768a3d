//! Behavior-tree front-end over the utility action set.
//!
//! A tree's conditions come from a [`ConditionRegistry`]; its action leaves
//! name registered [`UtilityAction`]s. Ticking an action leaf scores that
//! action's candidates exactly as the [`DecisionController`] would and
//! executes the best one, so the tree only decides *which* action to try.
//!
//! At most one action executes per turn: once an action leaf has succeeded,
//! every later action leaf fails.
//!
//! [`DecisionController`]: crate::controller::DecisionController

mod conditions;

pub use conditions::{BADLY_HURT_RATIO, ConditionFn, ConditionRegistry, HURT_RATIO};

use std::panic::{self, AssertUnwindSafe};

use behavior_tree::{Behavior, Leaf, LeafKind, Node, NodeSpec, Status};
use tactics_core::{Blackboard, UnitId, World};

use crate::action::{ScoredContext, UtilityAction};
use crate::config::DecisionConfig;
use crate::context::{ActionContext, AiContext};
use crate::controller::{
    TurnOutcome, UnitController, designate, ensure_unique, execute_guarded, index_of,
    panic_message, run_fallback, skip_unless_alive,
};
use crate::error::ScriptError;

/// A bound tree leaf.
#[derive(Clone, Copy)]
pub enum ScriptLeaf {
    Condition(ConditionFn),
    /// Index into the controller's action list.
    Action(usize),
}

/// Mutable state threaded through one tick.
pub struct ScriptContext<'w> {
    world: &'w mut World,
    board: &'w mut Blackboard,
    unit: UnitId,
    actions: &'w [UtilityAction],
    performed: Option<(usize, ScoredContext)>,
    failures: Vec<String>,
}

impl<'w> ScriptContext<'w> {
    fn new(
        world: &'w mut World,
        board: &'w mut Blackboard,
        unit: UnitId,
        actions: &'w [UtilityAction],
    ) -> Self {
        Self {
            world,
            board,
            unit,
            actions,
            performed: None,
            failures: Vec::new(),
        }
    }

    fn check(&self, condition: ConditionFn) -> Status {
        let (world, board) = (&*self.world, &*self.board);
        let Some(agent) = world.unit(self.unit) else {
            return Status::Failure;
        };
        let implicit = ActionContext::implicit(self.unit);
        Status::from(condition(&AiContext::new(world, board, agent, &implicit)))
    }

    fn perform(&mut self, index: usize) -> Status {
        if self.performed.is_some() {
            return Status::Failure;
        }
        let actions = self.actions;
        let Some(action) = actions.get(index) else {
            return Status::Failure;
        };

        let scored = {
            let (world, board) = (&*self.world, &*self.board);
            world
                .unit(self.unit)
                .and_then(|agent| action.evaluate(world, board, agent))
        };
        let Some(scored) = scored else {
            tracing::trace!(unit = %self.unit, action = action.name(), "not executable");
            return Status::Failure;
        };

        match execute_guarded(action, self.world, self.board, &scored.context) {
            Ok(()) => {
                self.performed = Some((index, scored));
                Status::Success
            }
            Err(reason) => {
                tracing::warn!(unit = %self.unit, %reason, "scripted action failed");
                self.failures.push(reason);
                Status::Failure
            }
        }
    }
}

impl<'w> Leaf<ScriptContext<'w>> for ScriptLeaf {
    fn tick(&self, ctx: &mut ScriptContext<'w>) -> Status {
        match *self {
            ScriptLeaf::Condition(condition) => ctx.check(condition),
            ScriptLeaf::Action(index) => ctx.perform(index),
        }
    }
}

/// Unit controller driven by a compiled behavior tree.
pub struct ScriptController {
    tree: Node<ScriptLeaf>,
    actions: Vec<UtilityAction>,
    fallback: Option<usize>,
}

impl ScriptController {
    /// Binds every leaf of `spec`. Fails on the first unknown condition or
    /// action name, on duplicate action names, or on an unregistered
    /// fallback action.
    pub fn compile(
        spec: &NodeSpec,
        actions: Vec<UtilityAction>,
        conditions: &ConditionRegistry,
        config: &DecisionConfig,
    ) -> Result<Self, ScriptError> {
        ensure_unique(&actions)?;
        let fallback = designate(&actions, "fallback", config.fallback_action.as_deref())?;
        let tree = spec.resolve(&mut |kind: LeafKind, name: &str| match kind {
            LeafKind::Condition => conditions.get(name).map(ScriptLeaf::Condition),
            LeafKind::Action => index_of(&actions, name).map(ScriptLeaf::Action),
        })?;
        tracing::debug!(leaves = tree.leaf_count(), "behavior tree compiled");
        Ok(Self {
            tree,
            actions,
            fallback,
        })
    }

    pub fn actions(&self) -> &[UtilityAction] {
        &self.actions
    }
}

impl UnitController for ScriptController {
    fn take_turn(&self, world: &mut World, board: &mut Blackboard, unit: UnitId) -> TurnOutcome {
        if let Some(outcome) = skip_unless_alive(world, unit) {
            return outcome;
        }
        world.refresh_visibility(unit);

        let mut ctx = ScriptContext::new(world, board, unit, &self.actions);
        let ticked = panic::catch_unwind(AssertUnwindSafe(|| self.tree.tick(&mut ctx)));
        let ScriptContext {
            performed,
            failures,
            ..
        } = ctx;

        let outcome = match (performed, ticked) {
            (Some((index, scored)), _) => TurnOutcome::Executed {
                action: self.actions[index].name().to_owned(),
                context: scored.context,
                utility: scored.utility,
                emergency: false,
            },
            (None, Err(payload)) => {
                let reason = format!("tree panicked: {}", panic_message(payload.as_ref()));
                run_fallback(&self.actions, self.fallback, world, board, unit, reason)
            }
            (None, Ok(_)) if !failures.is_empty() => {
                let reason = failures.join("; ");
                run_fallback(&self.actions, self.fallback, world, board, unit, reason)
            }
            (None, Ok(status)) => {
                tracing::warn!(%unit, success = status.is_success(), "tree finished without acting");
                TurnOutcome::Skipped {
                    reason: "no executable action".to_owned(),
                }
            }
        };

        world.end_unit_turn(unit);
        outcome
    }
}
