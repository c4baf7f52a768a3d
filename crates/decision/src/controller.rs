//! Per-unit decision making.
//!
//! [`DecisionController`] is the canonical front-end: it scores every
//! registered action, applies the emergency retreat override and the
//! objective multiplier, and executes the winner. [`ScriptController`]
//! shares the same actions and scoring but lets a behavior tree pick which
//! action to try.
//!
//! Neither controller lets a failure escape a turn. Panics inside scoring or
//! execution are caught, errors are logged, and the designated fallback
//! action runs in their place.
//!
//! [`ScriptController`]: crate::script::ScriptController

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use tactics_core::{Blackboard, UnitId, World};

use crate::action::{ScoredContext, UtilityAction};
use crate::config::DecisionConfig;
use crate::context::ActionContext;
use crate::error::ControllerError;

/// What happened on one unit's turn.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    Executed {
        action: String,
        context: ActionContext,
        utility: f32,
        /// Chosen by the emergency retreat override.
        emergency: bool,
    },
    /// Selection or execution failed and the fallback ran (or was attempted
    /// and did nothing: `action` is `None`).
    Fallback {
        action: Option<String>,
        reason: String,
    },
    Skipped {
        reason: String,
    },
}

impl TurnOutcome {
    pub fn action(&self) -> Option<&str> {
        match self {
            TurnOutcome::Executed { action, .. } => Some(action),
            TurnOutcome::Fallback { action, .. } => action.as_deref(),
            TurnOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, TurnOutcome::Executed { emergency: true, .. })
    }
}

/// Drives a single unit's turn against the host.
pub trait UnitController {
    fn take_turn(&self, world: &mut World, board: &mut Blackboard, unit: UnitId) -> TurnOutcome;
}

/// Selection result before execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// Index into the controller's action list.
    pub action: usize,
    pub context: ActionContext,
    /// Utility after the objective multiplier.
    pub utility: f32,
    pub emergency: bool,
}

pub struct DecisionController {
    actions: Vec<UtilityAction>,
    config: DecisionConfig,
    retreat: Option<usize>,
    fallback: Option<usize>,
}

impl DecisionController {
    /// Fails on duplicate action names or on a designated retreat/fallback
    /// action that is not registered.
    pub fn new(actions: Vec<UtilityAction>, config: DecisionConfig) -> Result<Self, ControllerError> {
        ensure_unique(&actions)?;
        let retreat = designate(&actions, "retreat", config.retreat_action.as_deref())?;
        let fallback = designate(&actions, "fallback", config.fallback_action.as_deref())?;
        Ok(Self {
            actions,
            config,
            retreat,
            fallback,
        })
    }

    pub fn actions(&self) -> &[UtilityAction] {
        &self.actions
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn action(&self, index: usize) -> Option<&UtilityAction> {
        self.actions.get(index)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Picks an action for `unit` without executing it. Assumes visibility
    /// is current. `None` when the unit is missing, dead, or no action is
    /// executable.
    pub fn decide(&self, world: &World, board: &Blackboard, unit: UnitId) -> Option<Decision> {
        let agent = world.unit(unit).filter(|agent| agent.is_alive())?;

        if let Some(decision) = self.emergency(world, board, unit) {
            return Some(decision);
        }

        let mut best: Option<Decision> = None;
        for (index, action) in self.actions.iter().enumerate() {
            let Some(ScoredContext { context, utility }) = action.evaluate(world, board, agent) else {
                tracing::trace!(action = action.name(), "not executable");
                continue;
            };
            let weighted = utility * self.objective_multiplier(action, board);
            tracing::debug!(
                %unit,
                action = action.name(),
                %context,
                utility,
                weighted,
                "candidate"
            );
            if best.as_ref().is_none_or(|current| weighted > current.utility) {
                best = Some(Decision {
                    action: index,
                    context,
                    utility: weighted,
                    emergency: false,
                });
            }
        }
        best
    }

    /// Retreat bypasses normal scoring when the unit is hurt below the
    /// health threshold and retreating scores above the utility threshold.
    fn emergency(&self, world: &World, board: &Blackboard, unit: UnitId) -> Option<Decision> {
        let index = self.retreat?;
        let agent = world.unit(unit)?;
        let health = agent.health_ratio();
        if health >= self.config.retreat_health_threshold {
            return None;
        }
        let scored = self.actions[index].evaluate(world, board, agent)?;
        if scored.utility <= self.config.retreat_utility_threshold {
            return None;
        }
        tracing::info!(
            %unit,
            health,
            utility = scored.utility,
            "emergency retreat"
        );
        Some(Decision {
            action: index,
            context: scored.context,
            utility: scored.utility,
            emergency: true,
        })
    }

    /// `1 + W * priority` for attack-class actions while an objective is
    /// active, otherwise 1.
    pub fn objective_multiplier(&self, action: &UtilityAction, board: &Blackboard) -> f32 {
        match board.top_objective() {
            Some(objective) if self.is_attack_class(action) => {
                1.0 + self.config.objective_weight * f32::from(objective.priority)
            }
            _ => 1.0,
        }
    }

    /// Attack-class by category, or by name for actions registered under a
    /// generic category.
    pub fn is_attack_class(&self, action: &UtilityAction) -> bool {
        self.config.is_attack_category(action.category())
            || self.config.is_attack_category(action.name())
    }
}

impl UnitController for DecisionController {
    fn take_turn(&self, world: &mut World, board: &mut Blackboard, unit: UnitId) -> TurnOutcome {
        if let Some(outcome) = skip_unless_alive(world, unit) {
            return outcome;
        }
        world.refresh_visibility(unit);

        let selected = panic::catch_unwind(AssertUnwindSafe(|| self.decide(&*world, &*board, unit)));
        let outcome = match selected {
            Err(payload) => {
                let reason = format!("selection panicked: {}", panic_message(payload.as_ref()));
                run_fallback(&self.actions, self.fallback, world, board, unit, reason)
            }
            Ok(None) => {
                tracing::warn!(%unit, "no executable action");
                TurnOutcome::Skipped {
                    reason: "no executable action".to_owned(),
                }
            }
            Ok(Some(decision)) => {
                let action = &self.actions[decision.action];
                match execute_guarded(action, world, board, &decision.context) {
                    Ok(()) => TurnOutcome::Executed {
                        action: action.name().to_owned(),
                        context: decision.context,
                        utility: decision.utility,
                        emergency: decision.emergency,
                    },
                    Err(reason) => run_fallback(&self.actions, self.fallback, world, board, unit, reason),
                }
            }
        };

        world.end_unit_turn(unit);
        outcome
    }
}

// ============================================================================
// Shared turn plumbing
// ============================================================================

pub(crate) fn ensure_unique(actions: &[UtilityAction]) -> Result<(), ControllerError> {
    let mut seen = BTreeSet::new();
    for action in actions {
        if !seen.insert(action.name()) {
            return Err(ControllerError::DuplicateAction(action.name().to_owned()));
        }
    }
    Ok(())
}

pub(crate) fn index_of(actions: &[UtilityAction], name: &str) -> Option<usize> {
    actions.iter().position(|action| action.name() == name)
}

pub(crate) fn designate(
    actions: &[UtilityAction],
    role: &'static str,
    name: Option<&str>,
) -> Result<Option<usize>, ControllerError> {
    let Some(name) = name else {
        return Ok(None);
    };
    index_of(actions, name)
        .map(Some)
        .ok_or_else(|| ControllerError::UnknownDesignatedAction {
            role,
            name: name.to_owned(),
        })
}

pub(crate) fn skip_unless_alive(world: &World, unit: UnitId) -> Option<TurnOutcome> {
    let reason = match world.unit(unit) {
        None => "unknown unit",
        Some(agent) if !agent.is_alive() => "unit is dead",
        Some(_) => return None,
    };
    tracing::debug!(%unit, reason, "turn skipped");
    Some(TurnOutcome::Skipped {
        reason: reason.to_owned(),
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// Runs `action` with panics and errors folded into a reason string.
pub(crate) fn execute_guarded(
    action: &UtilityAction,
    world: &mut World,
    board: &mut Blackboard,
    context: &ActionContext,
) -> Result<(), String> {
    let result =
        panic::catch_unwind(AssertUnwindSafe(|| action.execute(&mut *world, &mut *board, context)));
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => {
            if error.is_recoverable() {
                tracing::debug!(action = action.name(), %error, "host rejected a stale decision");
            }
            Err(format!("`{}` failed: {error}", action.name()))
        }
        Err(payload) => Err(format!(
            "`{}` panicked: {}",
            action.name(),
            panic_message(payload.as_ref())
        )),
    }
}

/// Logs `reason` and runs the fallback action, if any. A fallback that is
/// itself not executable, errors or panics leaves the turn skipped.
pub(crate) fn run_fallback(
    actions: &[UtilityAction],
    fallback: Option<usize>,
    world: &mut World,
    board: &mut Blackboard,
    unit: UnitId,
    reason: String,
) -> TurnOutcome {
    tracing::warn!(%unit, %reason, "turn faulted, falling back");
    let Some(action) = fallback.and_then(|index| actions.get(index)) else {
        return TurnOutcome::Fallback { action: None, reason };
    };

    let scored = panic::catch_unwind(AssertUnwindSafe(|| {
        let (world, board) = (&*world, &*board);
        world
            .unit(unit)
            .and_then(|agent| action.evaluate(world, board, agent))
    }));
    let context = match scored {
        Ok(Some(scored)) => scored.context,
        Ok(None) | Err(_) => {
            tracing::warn!(%unit, fallback = action.name(), "fallback not executable");
            return TurnOutcome::Fallback { action: None, reason };
        }
    };

    match execute_guarded(action, world, board, &context) {
        Ok(()) => TurnOutcome::Fallback {
            action: Some(action.name().to_owned()),
            reason,
        },
        Err(failure) => {
            tracing::error!(%unit, %failure, "fallback failed");
            TurnOutcome::Fallback { action: None, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    fn names(actions: Vec<UtilityAction>) -> Vec<String> {
        actions.iter().map(|a| a.name().to_owned()).collect()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let actions = vec![presets::idle(), presets::attack(), presets::idle()];
        let error = DecisionController::new(actions, DecisionConfig::without_designations())
            .err()
            .unwrap();
        assert_eq!(error, ControllerError::DuplicateAction("idle".into()));
    }

    #[test]
    fn designated_actions_must_exist() {
        let error = DecisionController::new(vec![presets::idle()], DecisionConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            error,
            ControllerError::UnknownDesignatedAction {
                role: "retreat",
                name: "retreat".into()
            }
        );
    }

    #[test]
    fn standard_set_builds_with_default_config() {
        let controller =
            DecisionController::new(presets::standard_actions(), DecisionConfig::default()).unwrap();
        assert_eq!(
            names(presets::standard_actions()),
            controller
                .actions()
                .iter()
                .map(|a| a.name().to_owned())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn attack_class_by_category_or_name() {
        let controller =
            DecisionController::new(presets::standard_actions(), DecisionConfig::default()).unwrap();
        let by_category = presets::skill();
        assert!(controller.is_attack_class(&by_category));

        let by_name = UtilityAction::new("attack", "misc", crate::actions::IdleHandler);
        assert!(controller.is_attack_class(&by_name));

        assert!(!controller.is_attack_class(&presets::movement()));
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
