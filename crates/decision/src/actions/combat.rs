use tactics_core::{Blackboard, SkillSpec, Unit, UnitId, World};

use crate::action::ActionHandler;
use crate::context::{ActionContext, AiContext};
use crate::error::ActionError;

/// Living, hostile, within `range` (Chebyshev) and in line of sight.
fn strikeable(ctx: &AiContext<'_>, target: &Unit, range: u32) -> bool {
    target.is_alive()
        && ctx.agent.is_hostile_to(target)
        && ctx.agent.position.chebyshev_distance(target.position) <= range
        && ctx.map().has_line_of_sight(ctx.agent.position, target.position)
}

fn enemies_within<'w>(world: &'w World, agent: &'w Unit, range: u32) -> impl Iterator<Item = &'w Unit> {
    agent
        .visible_enemies
        .iter()
        .filter_map(|id| world.unit(*id))
        .filter(move |enemy| {
            enemy.is_alive() && agent.position.chebyshev_distance(enemy.position) <= range
        })
}

/// Adopts the first target hit as the team focus and drops the focus once
/// it is defeated.
fn track_focus(world: &World, board: &mut Blackboard, target: UnitId) {
    let defeated = world.unit(target).is_none_or(|unit| !unit.is_alive());
    match board.focus_target() {
        Some(focus) if focus == target && defeated => board.clear_focus_target(),
        None if !defeated => board.set_focus_target(target),
        _ => {}
    }
}

fn target_name(world: &World, target: UnitId) -> String {
    world
        .unit(target)
        .map_or_else(|| target.to_string(), |unit| unit.name.clone())
}

fn defeat_suffix(world: &World, target: UnitId) -> &'static str {
    if world.unit(target).is_some_and(|unit| unit.is_alive()) {
        ""
    } else {
        ", defeating it"
    }
}

/// Basic attack against a visible enemy in attack range.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackHandler;

impl ActionHandler for AttackHandler {
    fn generate_contexts(&self, world: &World, agent: &Unit) -> Option<Vec<ActionContext>> {
        Some(
            enemies_within(world, agent, agent.attack_range)
                .map(|enemy| ActionContext::implicit(agent.id).with_target(enemy.id))
                .collect(),
        )
    }

    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        ctx.target()
            .is_some_and(|target| strikeable(ctx, target, ctx.agent.attack_range))
    }

    fn execute(
        &self,
        world: &mut World,
        board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        let target = ctx.target.ok_or(ActionError::MissingContext {
            action: "attack",
            field: "target",
        })?;
        let damage = world.attack(ctx.agent, target)?;
        let message = format!(
            "attacks {} for {damage} damage{}",
            target_name(world, target),
            defeat_suffix(world, target)
        );
        world.log(ctx.agent, message);
        track_focus(world, board, target);
        Ok(())
    }
}

/// Enemy-targeted skill. Debuff skills record the debuff on the team
/// blackboard so allies can avoid stacking it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkillStrikeHandler;

impl SkillStrikeHandler {
    fn usable<'w>(world: &'w World, agent: &Unit) -> impl Iterator<Item = &'w SkillSpec> {
        let ready: Vec<_> = agent
            .skills
            .iter()
            .copied()
            .filter(|skill| agent.is_skill_ready(*skill))
            .collect();
        let mana = agent.mana.current;
        ready
            .into_iter()
            .filter_map(|skill| world.skills().get(skill))
            .filter(move |spec| spec.is_offensive() && spec.mana_cost <= mana)
    }
}

impl ActionHandler for SkillStrikeHandler {
    fn generate_contexts(&self, world: &World, agent: &Unit) -> Option<Vec<ActionContext>> {
        let mut contexts = Vec::new();
        for spec in Self::usable(world, agent) {
            for enemy in enemies_within(world, agent, spec.range) {
                contexts.push(
                    ActionContext::implicit(agent.id)
                        .with_target(enemy.id)
                        .with_skill(spec.id),
                );
            }
        }
        Some(contexts)
    }

    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        let (Some(spec), Some(target)) = (ctx.skill(), ctx.target()) else {
            return false;
        };
        spec.is_offensive()
            && ctx.agent.knows_skill(spec.id)
            && ctx.agent.is_skill_ready(spec.id)
            && ctx.agent.mana.current >= spec.mana_cost
            && strikeable(ctx, target, spec.range)
    }

    fn execute(
        &self,
        world: &mut World,
        board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        let missing = |field| ActionError::MissingContext {
            action: "skill",
            field,
        };
        let target = ctx.target.ok_or(missing("target"))?;
        let skill = ctx.skill.ok_or(missing("skill"))?;
        let spec = world
            .skills()
            .get(skill)
            .cloned()
            .ok_or(ActionError::NoUsableSkill { action: "skill" })?;

        let damage = world.use_skill_on_target(ctx.agent, skill, target)?;
        if let Some((kind, duration)) = spec.debuff() {
            board.set_debuff(target, kind, skill, duration, world.turn());
        }

        let message = format!(
            "casts {} on {} for {damage} damage{}",
            spec.name,
            target_name(world, target),
            defeat_suffix(world, target)
        );
        world.log(ctx.agent, message);
        track_focus(world, board, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        DebuffKind, GridMap, MapDimensions, Position, SkillBook, SkillEffect, SkillId,
        SkillTarget, TeamId, Terrain,
    };

    const HERO: UnitId = UnitId(1);
    const FOE: UnitId = UnitId(2);
    const HIDDEN: UnitId = UnitId(3);
    const SNARE: SkillId = SkillId(1);

    fn world() -> World {
        let skills = SkillBook::from_iter([SkillSpec {
            id: SNARE,
            name: "snare".into(),
            target: SkillTarget::Enemy,
            effect: SkillEffect::Debuff {
                kind: DebuffKind::Slow,
                duration: 3,
                damage: 5,
            },
            range: 3,
            mana_cost: 5,
            cooldown: 2,
        }]);
        let mut map = GridMap::new(MapDimensions::new(8, 8));
        map.set_terrain(Position::new(5, 4), Terrain::Obstacle);
        let mut world = World::new(map, skills);
        world
            .spawn(
                Unit::new(HERO, "hero", TeamId(0), Position::new(4, 4))
                    .with_attack(10, 1)
                    .with_mana(10, 10)
                    .with_skills([SNARE]),
            )
            .unwrap();
        world
            .spawn(Unit::new(FOE, "foe", TeamId(1), Position::new(3, 3)).with_health(8, 20))
            .unwrap();
        world
            .spawn(Unit::new(HIDDEN, "hidden", TeamId(1), Position::new(6, 4)))
            .unwrap();
        world.refresh_visibility(HERO);
        world
    }

    #[test]
    fn attack_targets_only_visible_enemies_in_range() {
        let world = world();
        let contexts = AttackHandler
            .generate_contexts(&world, world.unit(HERO).unwrap())
            .unwrap();
        let targets: Vec<_> = contexts.iter().filter_map(|c| c.target).collect();
        assert_eq!(targets, vec![FOE]);
    }

    #[test]
    fn attack_sets_focus_and_clears_it_on_defeat() {
        let mut world = world();
        let mut board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_target(FOE);

        // 8 hp, 10 damage
        AttackHandler.execute(&mut world, &mut board, &action).unwrap();
        assert!(!world.unit(FOE).unwrap().is_alive());
        assert_eq!(board.focus_target(), None);
        assert!(world.journal().last().unwrap().message.ends_with("defeating it"));
    }

    #[test]
    fn surviving_target_becomes_focus() {
        let mut world = world();
        if let Some(foe) = world.unit_mut(FOE) {
            foe.health.current = 20;
        }
        let mut board = Blackboard::new();
        let action = ActionContext::implicit(HERO).with_target(FOE);
        AttackHandler.execute(&mut world, &mut board, &action).unwrap();
        assert_eq!(board.focus_target(), Some(FOE));
    }

    #[test]
    fn debuff_skill_records_on_blackboard() {
        let mut world = world();
        let mut board = Blackboard::new();
        let contexts = SkillStrikeHandler
            .generate_contexts(&world, world.unit(HERO).unwrap())
            .unwrap();
        assert_eq!(contexts.len(), 1);

        SkillStrikeHandler
            .execute(&mut world, &mut board, &contexts[0])
            .unwrap();
        assert!(board.has_debuff(FOE, DebuffKind::Slow, world.turn()));
        assert_eq!(world.unit(HERO).unwrap().mana.current, 5);
        assert!(!world.unit(HERO).unwrap().is_skill_ready(SNARE));
    }

    #[test]
    fn skill_on_cooldown_is_not_offered() {
        let mut world = world();
        world.unit_mut(HERO).unwrap().start_cooldown(SNARE, 2);
        let contexts = SkillStrikeHandler
            .generate_contexts(&world, world.unit(HERO).unwrap())
            .unwrap();
        assert!(contexts.is_empty());
    }
}
