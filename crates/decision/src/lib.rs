//! Decision core for turn-based tactical agents.
//!
//! Units pick one action per turn by utility scoring:
//!
//! 1. Every registered [`UtilityAction`] enumerates its candidate
//!    [`ActionContext`]s, drops those whose preconditions fail, and scores
//!    the rest with its considerations and [`Aggregator`].
//! 2. The [`DecisionController`] keeps each action's best candidate, applies
//!    the objective multiplier to attack-class actions, and executes the
//!    overall winner. A badly hurt unit with a strong retreat option skips
//!    the comparison entirely.
//! 3. The [`TurnRunner`] drives whole rounds: a [`TeamStrategist`] updates
//!    the team [`Blackboard`](tactics_core::Blackboard), then each unit acts.
//!
//! [`ScriptController`] is an alternate front-end that lets a behavior tree
//! choose which action to try while reusing the same scoring.

pub mod action;
pub mod actions;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod presets;
pub mod scoring;
pub mod script;
pub mod strategy;
pub mod turn;

pub use action::{ActionHandler, ScoredContext, UtilityAction};
pub use config::{DecisionConfig, category};
pub use context::{ActionContext, AiContext};
pub use controller::{Decision, DecisionController, TurnOutcome, UnitController};
pub use error::{ActionError, ControllerError, ScriptError};
pub use scoring::{Aggregator, Consideration, MIN_SCORE, ResponseCurve};
pub use script::{ConditionRegistry, ScriptController};
pub use strategy::TeamStrategist;
pub use turn::{RoundReport, TeamSlot, TurnRunner};
