//! The scenario shipped with the sim binary loads and plays out.
use std::path::PathBuf;

use decision::{DecisionConfig, TurnRunner};
use tactics_content::{ConfigLoader, ControllerSpec, ScenarioLoader};
use tactics_core::{TeamId, Turn};

fn sim_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../sim").join(relative)
}

#[test]
fn bundled_config_matches_defaults() {
    let config = ConfigLoader::load(&sim_file("config/decision.toml")).unwrap();
    assert_eq!(config, DecisionConfig::default());
}

#[test]
fn bundled_scenario_runs() {
    let scenario = ScenarioLoader::load(&sim_file("scenarios/skirmish.ron")).unwrap();
    assert_eq!(scenario.teams.len(), 2);
    assert_eq!(scenario.teams[1].controller, ControllerSpec::Script);
    assert_eq!(scenario.world.team_roster(TeamId(0)).len(), 3);

    let config = DecisionConfig::default();
    let mut world = scenario.world;
    let mut runner = TurnRunner::new();
    for setup in &scenario.teams {
        let slot = runner.add_team(setup.team, setup.controller.build(&config).unwrap());
        for objective in &setup.objectives {
            slot.board.push_objective(*objective);
        }
    }

    let reports = runner.run(&mut world, 5);
    assert_eq!(reports.len(), 5);
    assert_eq!(world.turn(), Turn(5));
    assert!(!world.journal().is_empty());
}
