#![allow(dead_code)]

use decision::scoring::considerations::Constant;
use decision::{ActionContext, ActionError, ActionHandler, AiContext, UtilityAction};
use tactics_core::{
    Blackboard, DebuffKind, GridMap, MapDimensions, Position, SkillBook, SkillEffect, SkillId,
    SkillSpec, SkillTarget, TeamId, Unit, UnitId, World,
};

pub const HERO: UnitId = UnitId(1);
pub const FOE: UnitId = UnitId(2);
pub const RED: TeamId = TeamId(0);
pub const BLUE: TeamId = TeamId(1);
pub const WITHER: SkillId = SkillId(1);
pub const MEND: SkillId = SkillId(2);

/// Always executable, does nothing.
pub struct Noop;

impl ActionHandler for Noop {
    fn can_execute(&self, _ctx: &AiContext<'_>) -> bool {
        true
    }

    fn execute(&self, _: &mut World, _: &mut Blackboard, _: &ActionContext) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Panics on execution.
pub struct Explodes;

impl ActionHandler for Explodes {
    fn can_execute(&self, _ctx: &AiContext<'_>) -> bool {
        true
    }

    fn execute(&self, _: &mut World, _: &mut Blackboard, _: &ActionContext) -> Result<(), ActionError> {
        panic!("handler exploded")
    }
}

/// Returns an error on execution.
pub struct Fails;

impl ActionHandler for Fails {
    fn can_execute(&self, _ctx: &AiContext<'_>) -> bool {
        true
    }

    fn execute(&self, _: &mut World, _: &mut Blackboard, _: &ActionContext) -> Result<(), ActionError> {
        Err(ActionError::NoUsableSkill { action: "fails" })
    }
}

/// Action scoring a fixed utility.
pub fn fixed(
    name: &str,
    category: &str,
    utility: f32,
    handler: impl ActionHandler + 'static,
) -> UtilityAction {
    UtilityAction::new(name, category, handler).with_consideration(Constant(utility))
}

pub fn skills() -> SkillBook {
    SkillBook::from_iter([
        SkillSpec {
            id: WITHER,
            name: "wither".into(),
            target: SkillTarget::Enemy,
            effect: SkillEffect::Debuff {
                kind: DebuffKind::Weaken,
                duration: 3,
                damage: 6,
            },
            range: 4,
            mana_cost: 4,
            cooldown: 2,
        },
        SkillSpec {
            id: MEND,
            name: "mend".into(),
            target: SkillTarget::SelfOnly,
            effect: SkillEffect::Heal(25),
            range: 0,
            mana_cost: 3,
            cooldown: 3,
        },
    ])
}

/// Hero and foe two tiles apart on an open 8x8 map.
pub fn duel(hero_health: u32) -> World {
    let mut world = World::new(GridMap::new(MapDimensions::new(8, 8)), skills());
    world
        .spawn(
            Unit::new(HERO, "hero", RED, Position::new(1, 1))
                .with_health(hero_health, 100)
                .with_mana(10, 10)
                .with_skills([WITHER, MEND]),
        )
        .expect("spawn hero");
    world
        .spawn(Unit::new(FOE, "foe", BLUE, Position::new(3, 1)))
        .expect("spawn foe");
    world
}
