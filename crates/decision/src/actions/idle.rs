use tactics_core::{Blackboard, World};

use crate::action::ActionHandler;
use crate::context::{ActionContext, AiContext};
use crate::error::ActionError;

/// Does nothing. Always executable for a living agent, which makes it the
/// usual fallback action.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleHandler;

impl ActionHandler for IdleHandler {
    fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        ctx.agent.is_alive()
    }

    fn execute(
        &self,
        world: &mut World,
        _board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        world.idle(ctx.agent)?;
        world.log(ctx.agent, "holds position");
        Ok(())
    }
}
