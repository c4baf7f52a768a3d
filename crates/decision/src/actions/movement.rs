use tactics_core::{Blackboard, Unit, World};

use crate::action::ActionHandler;
use crate::context::{ActionContext, AiContext};
use crate::error::ActionError;

fn relocation_contexts(world: &World, agent: &Unit) -> Vec<ActionContext> {
    world
        .reachable_positions(agent.id)
        .into_iter()
        .map(|destination| ActionContext::implicit(agent.id).with_destination(destination))
        .collect()
}

fn can_relocate(ctx: &AiContext<'_>) -> bool {
    let Some(destination) = ctx.action.destination else {
        return false;
    };
    destination != ctx.agent.position
        && !ctx.map().has_unit(destination)
        && ctx
            .path_length(ctx.agent.position, destination)
            .within(ctx.agent.move_range)
}

fn relocate(
    action: &'static str,
    verb: &str,
    world: &mut World,
    ctx: &ActionContext,
) -> Result<(), ActionError> {
    let destination = ctx
        .destination
        .ok_or(ActionError::MissingContext { action, field: "destination" })?;
    let origin = world
        .unit(ctx.agent)
        .map(|unit| unit.position)
        .unwrap_or(destination);
    let steps = world.move_unit(ctx.agent, destination)?;
    world.log(
        ctx.agent,
        format!("{verb} from {origin} to {destination} ({steps} steps)"),
    );
    Ok(())
}

/// Moves to one of the agent's reachable, unoccupied tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveHandler;

impl ActionHandler for MoveHandler {
    fn generate_contexts(&self, world: &World, agent: &Unit) -> Option<Vec<ActionContext>> {
        Some(relocation_contexts(world, agent))
    }

    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        can_relocate(ctx)
    }

    fn execute(
        &self,
        world: &mut World,
        _board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        relocate("move", "moves", world, ctx)
    }
}

/// Same candidates as [`MoveHandler`], only available while an enemy is in
/// sight. Where to go is left to the considerations.
#[derive(Clone, Copy, Debug, Default)]
pub struct RetreatHandler;

impl ActionHandler for RetreatHandler {
    fn generate_contexts(&self, world: &World, agent: &Unit) -> Option<Vec<ActionContext>> {
        Some(relocation_contexts(world, agent))
    }

    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        ctx.visible_enemies().next().is_some() && can_relocate(ctx)
    }

    fn execute(
        &self,
        world: &mut World,
        _board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        relocate("retreat", "retreats", world, ctx)
    }
}
