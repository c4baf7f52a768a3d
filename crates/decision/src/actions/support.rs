use tactics_core::{Blackboard, SkillId, Unit, World};

use crate::action::ActionHandler;
use crate::context::{ActionContext, AiContext};
use crate::error::ActionError;

/// Casts the agent's strongest ready, affordable self-heal.
///
/// Evaluated against the implicit context: the skill is chosen at
/// execution time.
#[derive(Clone, Copy, Debug, Default)]
pub struct HealSelfHandler;

impl HealSelfHandler {
    fn pick(world: &World, agent: &Unit) -> Option<SkillId> {
        let mut best: Option<(u32, SkillId)> = None;
        for &skill in &agent.skills {
            let Some(spec) = world.skills().get(skill) else {
                continue;
            };
            let Some(amount) = spec.heal_amount() else {
                continue;
            };
            if spec.is_offensive()
                || !agent.is_skill_ready(skill)
                || agent.mana.current < spec.mana_cost
            {
                continue;
            }
            if best.is_none_or(|(strongest, _)| amount > strongest) {
                best = Some((amount, skill));
            }
        }
        best.map(|(_, skill)| skill)
    }
}

impl ActionHandler for HealSelfHandler {
    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        ctx.agent.health.current < ctx.agent.health.maximum
            && Self::pick(ctx.world, ctx.agent).is_some()
    }

    fn execute(
        &self,
        world: &mut World,
        _board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        let skill = world
            .unit(ctx.agent)
            .and_then(|agent| Self::pick(world, agent))
            .ok_or(ActionError::NoUsableSkill { action: "heal_self" })?;
        let restored = world.use_self_skill(ctx.agent, skill)?;
        let name = world
            .skills()
            .get(skill)
            .map_or_else(|| skill.to_string(), |spec| spec.name.clone());
        world.log(ctx.agent, format!("casts {name}, restoring {restored} health"));
        Ok(())
    }
}
