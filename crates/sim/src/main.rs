//! Turn-loop host.
//!
//! Loads a scenario, builds one controller per team, and plays rounds until
//! a single team remains or the round limit is reached. The battle journal
//! and a per-team summary are printed to stdout; diagnostics go through
//! `tracing`.
//!
//! ```bash
//! TACTICS_SCENARIO=crates/sim/scenarios/skirmish.ron TACTICS_ROUNDS=30 \
//!     RUST_LOG=decision=debug cargo run -p tactics-sim
//! ```
mod config;
mod logging;
mod summary;

use anyhow::{Context, Result};
use decision::{DecisionConfig, TurnRunner};
use tactics_content::{ConfigLoader, Scenario, ScenarioLoader};

use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let decision_config = match &config.decision_config {
        Some(path) => ConfigLoader::load(path)?,
        None => DecisionConfig::default(),
    };
    tracing::debug!(?decision_config, "decision config");

    let Scenario {
        name,
        mut world,
        teams,
    } = ScenarioLoader::load(&config.scenario)?;
    tracing::info!("Starting scenario {} ({} rounds max)", name, config.rounds);

    let mut runner = TurnRunner::new();
    for setup in &teams {
        let controller = setup
            .controller
            .build(&decision_config)
            .with_context(|| format!("Failed to build controller for {}", setup.team))?;
        let slot = runner.add_team(setup.team, controller);
        for objective in &setup.objectives {
            slot.board.push_objective(*objective);
        }
    }

    let reports = runner.run(&mut world, config.rounds);
    summary::print(&name, &world, &reports);
    Ok(())
}
