//! Ready-made action set and behavior tree.
//!
//! ```text
//! standard_actions()
//!   ├─ attack      [attack]    Product(target_health, focus_alignment, self_health)
//!   ├─ skill       [attack]    Product(target_health, debuff_absent, mana_reserve, focus_alignment)
//!   ├─ heal_self   [support]   Min(self_health², mana_reserve)
//!   ├─ retreat     [retreat]   Min(self_health⁻¹, destination_safety)
//!   ├─ move        [movement]  Product(0.5, closing_distance, objective_proximity)
//!   └─ idle        [idle]      Constant(0.05)
//! ```
//!
//! Registration order doubles as the tie-break order, so attacks come first.

use behavior_tree::NodeSpec;
use behavior_tree::builder::{action, condition, selector, sequence};

use crate::action::UtilityAction;
use crate::actions::{
    AttackHandler, HealSelfHandler, IdleHandler, MoveHandler, RetreatHandler, SkillStrikeHandler,
};
use crate::config::category;
use crate::scoring::considerations::{
    ClosingDistance, Constant, DebuffAbsent, DestinationSafety, FocusAlignment, ManaReserve,
    ObjectiveProximity, SelfHealth, TargetHealth,
};
use crate::scoring::{Aggregator, ResponseCurve};

pub const ATTACK: &str = "attack";
pub const SKILL: &str = "skill";
pub const HEAL_SELF: &str = "heal_self";
pub const RETREAT: &str = "retreat";
pub const MOVE: &str = "move";
pub const IDLE: &str = "idle";

/// Path distance beyond which closing or objective scores bottom out.
const ENGAGEMENT_RADIUS: u32 = 12;
/// Distance from the nearest enemy considered fully safe. Must not exceed
/// the default move range.
const SAFE_DISTANCE: u32 = 3;

pub fn standard_actions() -> Vec<UtilityAction> {
    vec![attack(), skill(), heal_self(), retreat(), movement(), idle()]
}

/// Basic attack. Prefers wounded targets and the focus target; a badly
/// wounded attacker is less keen.
pub fn attack() -> UtilityAction {
    UtilityAction::new(ATTACK, category::ATTACK, AttackHandler)
        .with_consideration(TargetHealth::new(ResponseCurve::Remap { from: 1.0, to: 0.5 }))
        .with_consideration(FocusAlignment::default())
        .with_consideration(SelfHealth::new(ResponseCurve::Remap { from: 0.3, to: 1.0 }))
        .with_aggregator(Aggregator::Product)
}

/// Offensive skills. Redundant debuffs zero out through the product.
pub fn skill() -> UtilityAction {
    UtilityAction::new(SKILL, category::ATTACK, SkillStrikeHandler)
        .with_consideration(TargetHealth::new(ResponseCurve::Remap { from: 1.0, to: 0.6 }))
        .with_consideration(DebuffAbsent::default())
        .with_consideration(ManaReserve::new(ResponseCurve::Remap { from: 0.6, to: 1.0 }))
        .with_consideration(FocusAlignment::default())
        .with_aggregator(Aggregator::Product)
}

pub fn heal_self() -> UtilityAction {
    UtilityAction::new(HEAL_SELF, category::SUPPORT, HealSelfHandler)
        .with_consideration(SelfHealth::new(ResponseCurve::InverseQuadratic))
        .with_consideration(ManaReserve::new(ResponseCurve::Remap { from: 0.5, to: 1.0 }))
        .with_aggregator(Aggregator::Min)
}

/// Flee toward the safest reachable tile. Scores high only when the agent
/// is both hurt and has somewhere safe to go.
pub fn retreat() -> UtilityAction {
    UtilityAction::new(RETREAT, category::RETREAT, RetreatHandler)
        .with_consideration(SelfHealth::new(ResponseCurve::Inverse))
        .with_consideration(DestinationSafety::new(SAFE_DISTANCE))
        .with_aggregator(Aggregator::Min)
}

pub fn movement() -> UtilityAction {
    UtilityAction::new(MOVE, category::MOVEMENT, MoveHandler)
        .with_consideration(Constant(0.5))
        .with_consideration(ClosingDistance::new(ENGAGEMENT_RADIUS))
        .with_consideration(ObjectiveProximity::new(ENGAGEMENT_RADIUS))
        .with_aggregator(Aggregator::Product)
}

pub fn idle() -> UtilityAction {
    UtilityAction::new(IDLE, category::IDLE, IdleHandler).with_consideration(Constant(0.05))
}

/// Scripted equivalent of the standard set, for [`ScriptController`].
///
/// ```text
/// Selector
///   ├─ Sequence[is_badly_hurt, enemy_visible, retreat]
///   ├─ Sequence[is_hurt, heal_self]
///   ├─ Sequence[enemy_in_attack_range, Selector[skill, attack]]
///   ├─ move
///   └─ idle
/// ```
///
/// [`ScriptController`]: crate::script::ScriptController
pub fn skirmisher_tree() -> NodeSpec {
    selector(vec![
        sequence(vec![
            condition("is_badly_hurt"),
            condition("enemy_visible"),
            action(RETREAT),
        ]),
        sequence(vec![condition("is_hurt"), action(HEAL_SELF)]),
        sequence(vec![
            condition("enemy_in_attack_range"),
            selector(vec![action(SKILL), action(ATTACK)]),
        ]),
        action(MOVE),
        action(IDLE),
    ])
}
