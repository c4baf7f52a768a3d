//! Stock considerations used by the preset action set.

use tactics_core::Position;

use super::{Consideration, ResponseCurve};
use crate::context::AiContext;

/// Normalizes a path distance against `max`: 0 steps is 1.0, `max` or more
/// is 0.0. Unreachable is 0.0.
fn closeness(steps: Option<u32>, max: u32) -> f32 {
    match steps {
        Some(steps) if max > 0 => 1.0 - (steps.min(max) as f32 / max as f32),
        Some(0) => 1.0,
        _ => 0.0,
    }
}

/// Fixed score regardless of context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub f32);

impl Consideration for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn score(&self, _ctx: &AiContext<'_>) -> f32 {
        self.0
    }
}

/// Agent's own health ratio through a curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfHealth {
    pub curve: ResponseCurve,
}

impl SelfHealth {
    pub fn new(curve: ResponseCurve) -> Self {
        Self { curve }
    }
}

impl Consideration for SelfHealth {
    fn name(&self) -> &str {
        "self_health"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        self.curve.apply(ctx.agent.health_ratio())
    }
}

/// Mana left after paying for the candidate's skill, as a fraction of the
/// agent's pool. Agents without a mana pool score 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManaReserve {
    pub curve: ResponseCurve,
}

impl ManaReserve {
    pub fn new(curve: ResponseCurve) -> Self {
        Self { curve }
    }
}

impl Consideration for ManaReserve {
    fn name(&self) -> &str {
        "mana_reserve"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        let mana = ctx.agent.mana;
        if mana.maximum == 0 {
            return 1.0;
        }
        let cost = ctx.skill().map_or(0, |skill| skill.mana_cost);
        let left = mana.current.saturating_sub(cost);
        self.curve.apply(left as f32 / mana.maximum as f32)
    }
}

/// Target's health ratio through a curve. Scores 0 without a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetHealth {
    pub curve: ResponseCurve,
}

impl TargetHealth {
    pub fn new(curve: ResponseCurve) -> Self {
        Self { curve }
    }
}

impl Consideration for TargetHealth {
    fn name(&self) -> &str {
        "target_health"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        ctx.target()
            .map_or(0.0, |target| self.curve.apply(target.health_ratio()))
    }
}

/// Whether the target is the team's focus target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusAlignment {
    /// Target is the focus target.
    pub aligned: f32,
    /// A focus target exists and this is someone else.
    pub unaligned: f32,
    /// No focus target is set.
    pub neutral: f32,
}

impl Default for FocusAlignment {
    fn default() -> Self {
        Self {
            aligned: 1.0,
            unaligned: 0.6,
            neutral: 0.8,
        }
    }
}

impl Consideration for FocusAlignment {
    fn name(&self) -> &str {
        "focus_alignment"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        match (ctx.focus_target(), ctx.action.target) {
            (None, _) => self.neutral,
            (Some(focus), Some(target)) if focus.id == target => self.aligned,
            (Some(_), _) => self.unaligned,
        }
    }
}

/// Penalizes re-applying a debuff the target already carries.
///
/// Skills without a debuff effect, or candidates without a target, score 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebuffAbsent {
    /// Score when the debuff is already active.
    pub redundant: f32,
}

impl Default for DebuffAbsent {
    fn default() -> Self {
        Self { redundant: 0.0 }
    }
}

impl Consideration for DebuffAbsent {
    fn name(&self) -> &str {
        "debuff_absent"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        let (Some((kind, _)), Some(target)) =
            (ctx.skill().and_then(|skill| skill.debuff()), ctx.action.target)
        else {
            return 1.0;
        };
        if ctx.board.has_debuff(target, kind, ctx.now()) {
            self.redundant
        } else {
            1.0
        }
    }
}

/// How close the candidate's standing position is to the point of interest
/// (focus target, else nearest visible enemy). Scores `neutral` when there is
/// nothing to close on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosingDistance {
    pub max_distance: u32,
    pub neutral: f32,
}

impl ClosingDistance {
    pub fn new(max_distance: u32) -> Self {
        Self {
            max_distance,
            neutral: 0.5,
        }
    }
}

impl Consideration for ClosingDistance {
    fn name(&self) -> &str {
        "closing_distance"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        let Some(poi) = ctx.point_of_interest() else {
            return self.neutral;
        };
        let steps = ctx.path_length(ctx.standing_position(), poi).steps();
        closeness(steps, self.max_distance)
    }
}

/// How close the candidate's standing position is to the top objective's
/// target tile. Scores `neutral` without a positioned objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveProximity {
    pub max_distance: u32,
    pub neutral: f32,
}

impl ObjectiveProximity {
    pub fn new(max_distance: u32) -> Self {
        Self {
            max_distance,
            neutral: 0.5,
        }
    }
}

impl Consideration for ObjectiveProximity {
    fn name(&self) -> &str {
        "objective_proximity"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        let Some(goal) = ctx.board.top_objective().and_then(|objective| objective.target) else {
            return self.neutral;
        };
        let steps = ctx.path_length(ctx.standing_position(), goal).steps();
        closeness(steps, self.max_distance)
    }
}

/// Distance from the candidate's standing position to the nearest visible
/// enemy, normalized by `safe_distance`. No visible enemy scores 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestinationSafety {
    pub safe_distance: u32,
}

impl DestinationSafety {
    pub fn new(safe_distance: u32) -> Self {
        Self { safe_distance }
    }

    fn nearest_threat(&self, ctx: &AiContext<'_>, from: Position) -> Option<u32> {
        ctx.visible_enemies()
            .filter_map(|enemy| ctx.path_length(from, enemy.position).steps())
            .min()
    }
}

impl Consideration for DestinationSafety {
    fn name(&self) -> &str {
        "destination_safety"
    }

    fn score(&self, ctx: &AiContext<'_>) -> f32 {
        let Some(nearest) = self.nearest_threat(ctx, ctx.standing_position()) else {
            return 1.0;
        };
        if self.safe_distance == 0 {
            return 1.0;
        }
        (nearest as f32 / self.safe_distance as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ActionContext;
    use tactics_core::{
        Blackboard, DebuffKind, GridMap, MapDimensions, Objective, ObjectiveKind, SkillBook,
        SkillEffect, SkillId, SkillSpec, SkillTarget, TeamId, Turn, Unit, UnitId, World,
    };

    const HERO: UnitId = UnitId(1);
    const FOE: UnitId = UnitId(2);
    const HEX: SkillId = SkillId(7);

    fn world() -> World {
        let skills = SkillBook::from_iter([SkillSpec {
            id: HEX,
            name: "hex".into(),
            target: SkillTarget::Enemy,
            effect: SkillEffect::Debuff {
                kind: DebuffKind::Weaken,
                duration: 3,
                damage: 2,
            },
            range: 5,
            mana_cost: 4,
            cooldown: 2,
        }]);
        let mut world = World::new(GridMap::new(MapDimensions::new(10, 10)), skills);
        world
            .spawn(
                Unit::new(HERO, "hero", TeamId(0), Position::new(0, 0))
                    .with_health(30, 100)
                    .with_mana(8, 10)
                    .with_skills([HEX]),
            )
            .unwrap();
        world
            .spawn(Unit::new(FOE, "foe", TeamId(1), Position::new(4, 0)).with_health(25, 100))
            .unwrap();
        world.refresh_visibility(HERO);
        world
    }

    fn score(c: &dyn Consideration, world: &World, board: &Blackboard, action: &ActionContext) -> f32 {
        let agent = world.unit(HERO).unwrap();
        c.score(&AiContext::new(world, board, agent, action))
    }

    #[test]
    fn health_considerations_read_ratios() {
        let world = world();
        let board = Blackboard::new();
        let implicit = ActionContext::implicit(HERO);
        let targeted = ActionContext::implicit(HERO).with_target(FOE);

        let own = SelfHealth::new(ResponseCurve::Inverse);
        assert!((score(&own, &world, &board, &implicit) - 0.7).abs() < 1e-6);

        let theirs = TargetHealth::new(ResponseCurve::Linear);
        assert!((score(&theirs, &world, &board, &targeted) - 0.25).abs() < 1e-6);
        assert_eq!(score(&theirs, &world, &board, &implicit), 0.0);
    }

    #[test]
    fn mana_reserve_subtracts_skill_cost() {
        let world = world();
        let board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_target(FOE).with_skill(HEX);
        let reserve = ManaReserve::new(ResponseCurve::Linear);
        assert!((score(&reserve, &world, &board, &action) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn focus_alignment_three_ways() {
        let world = world();
        let mut board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_target(FOE);
        let focus = FocusAlignment::default();

        assert_eq!(score(&focus, &world, &board, &action), focus.neutral);
        board.set_focus_target(FOE);
        assert_eq!(score(&focus, &world, &board, &action), focus.aligned);
        let other = ActionContext::implicit(HERO).with_target(HERO);
        assert_eq!(score(&focus, &world, &board, &other), focus.unaligned);
    }

    #[test]
    fn debuff_absent_sees_active_debuffs_only() {
        let world = world();
        let mut board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_target(FOE).with_skill(HEX);
        let absent = DebuffAbsent::default();

        assert_eq!(score(&absent, &world, &board, &action), 1.0);
        board.set_debuff(FOE, DebuffKind::Weaken, HEX, 3, Turn::ZERO);
        assert_eq!(score(&absent, &world, &board, &action), 0.0);
    }

    #[test]
    fn closing_distance_rewards_nearer_destinations() {
        let world = world();
        let board = Blackboard::new();
        let closing = ClosingDistance::new(8);

        let stay = ActionContext::implicit(HERO);
        let step = ActionContext::implicit(HERO).with_destination(Position::new(3, 0));
        let near = score(&closing, &world, &board, &step);
        let far = score(&closing, &world, &board, &stay);
        assert!(near > far);
        assert!((near - (1.0 - 1.0 / 8.0)).abs() < 1e-6);
    }

    #[test]
    fn objective_proximity_neutral_without_objective() {
        let world = world();
        let mut board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_destination(Position::new(2, 2));
        let proximity = ObjectiveProximity::new(10);

        assert_eq!(score(&proximity, &world, &board, &action), 0.5);
        board.push_objective(Objective::new(ObjectiveKind::Capture, 5).at(Position::new(2, 2)));
        assert_eq!(score(&proximity, &world, &board, &action), 1.0);
    }

    #[test]
    fn safety_grows_with_distance_from_enemies() {
        let world = world();
        let board = Blackboard::new();
        let safety = DestinationSafety::new(4);

        let adjacent = ActionContext::implicit(HERO).with_destination(Position::new(3, 0));
        let home = ActionContext::implicit(HERO);
        assert!((score(&safety, &world, &board, &adjacent) - 0.25).abs() < 1e-6);
        assert_eq!(score(&safety, &world, &board, &home), 1.0);
    }
}
