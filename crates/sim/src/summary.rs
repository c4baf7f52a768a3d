//! End-of-battle report.
use decision::{RoundReport, TurnOutcome};
use tactics_core::World;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub executed: usize,
    pub emergencies: usize,
    pub fallbacks: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn from_reports(reports: &[RoundReport]) -> Self {
        let mut tally = Self::default();
        for (_, outcome) in reports.iter().flat_map(|report| &report.outcomes) {
            match outcome {
                TurnOutcome::Executed { emergency, .. } => {
                    tally.executed += 1;
                    if *emergency {
                        tally.emergencies += 1;
                    }
                }
                TurnOutcome::Fallback { .. } => tally.fallbacks += 1,
                TurnOutcome::Skipped { .. } => tally.skipped += 1,
            }
        }
        tally
    }
}

pub fn print(name: &str, world: &World, reports: &[RoundReport]) {
    println!("== {name} ==");
    for entry in world.journal() {
        let actor = world.unit(entry.unit).map_or("?", |unit| unit.name.as_str());
        println!("[turn {}] {actor} {}", entry.turn, entry.message);
    }

    let tally = Tally::from_reports(reports);
    println!();
    println!(
        "{} rounds: {} actions ({} emergency), {} fallbacks, {} skipped",
        reports.len(),
        tally.executed,
        tally.emergencies,
        tally.fallbacks,
        tally.skipped
    );

    for unit in world.units() {
        let state = if unit.is_alive() { "standing" } else { "down" };
        println!(
            "  {} {} ({}) at {}: {}/{} hp, {}",
            unit.team, unit.name, unit.id, unit.position, unit.health.current, unit.health.maximum, state
        );
    }

    let survivors = world.teams_alive();
    match survivors.len() {
        0 => println!("No team survived."),
        1 => {
            if let Some(team) = survivors.first() {
                println!("{team} wins.");
            }
        }
        _ => println!("No winner after {} rounds.", reports.len()),
    }
}
