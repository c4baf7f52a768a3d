//! Loaded battle setups.

use behavior_tree::NodeSpec;
use decision::presets;
use decision::{
    ConditionRegistry, DecisionConfig, DecisionController, ScriptController, ScriptError,
    UnitController,
};
use tactics_core::{Objective, TeamId, World};

/// Which front-end drives a team's units.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerSpec {
    /// Utility scoring over the standard action set.
    #[default]
    Utility,
    /// The preset skirmisher behavior tree.
    Script,
    /// A custom behavior tree over the standard action set.
    Tree(NodeSpec),
}

impl ControllerSpec {
    /// Builds the controller against the standard action set.
    pub fn build(&self, config: &DecisionConfig) -> Result<Box<dyn UnitController>, ScriptError> {
        let actions = presets::standard_actions();
        let controller: Box<dyn UnitController> = match self {
            ControllerSpec::Utility => Box::new(DecisionController::new(actions, config.clone())?),
            ControllerSpec::Script => Box::new(ScriptController::compile(
                &presets::skirmisher_tree(),
                actions,
                &ConditionRegistry::standard(),
                config,
            )?),
            ControllerSpec::Tree(tree) => Box::new(ScriptController::compile(
                tree,
                actions,
                &ConditionRegistry::standard(),
                config,
            )?),
        };
        Ok(controller)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeamSetup {
    pub team: TeamId,
    pub controller: ControllerSpec,
    /// Initial objectives, in file order.
    pub objectives: Vec<Objective>,
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: String,
    pub world: World,
    pub teams: Vec<TeamSetup>,
}
