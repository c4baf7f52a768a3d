//! Round-robin turn loop.
//!
//! Each round, teams act in registration order. A team's strategist runs
//! first, then each of its living units takes a turn in roster order, all
//! sharing the team's blackboard. Once every team has acted the world turn
//! advances.

use tactics_core::{Blackboard, TeamId, Turn, UnitId, World};

use crate::controller::{TurnOutcome, UnitController};
use crate::strategy::TeamStrategist;

/// Everything owned on behalf of one team.
pub struct TeamSlot {
    pub team: TeamId,
    pub board: Blackboard,
    controller: Box<dyn UnitController>,
    strategist: TeamStrategist,
}

/// Outcomes of one round, in the order units acted.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    pub turn: Turn,
    pub outcomes: Vec<(UnitId, TurnOutcome)>,
}

impl RoundReport {
    pub fn outcome_for(&self, unit: UnitId) -> Option<&TurnOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == unit)
            .map(|(_, outcome)| outcome)
    }
}

#[derive(Default)]
pub struct TurnRunner {
    slots: Vec<TeamSlot>,
}

impl TurnRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a team with a fresh blackboard. Re-registering a team
    /// replaces its controller and keeps its blackboard.
    pub fn add_team(&mut self, team: TeamId, controller: Box<dyn UnitController>) -> &mut TeamSlot {
        let index = match self.slots.iter().position(|slot| slot.team == team) {
            Some(index) => {
                self.slots[index].controller = controller;
                index
            }
            None => {
                self.slots.push(TeamSlot {
                    team,
                    board: Blackboard::new(),
                    controller,
                    strategist: TeamStrategist::new(),
                });
                self.slots.len() - 1
            }
        };
        &mut self.slots[index]
    }

    pub fn board(&self, team: TeamId) -> Option<&Blackboard> {
        self.slot(team).map(|slot| &slot.board)
    }

    pub fn board_mut(&mut self, team: TeamId) -> Option<&mut Blackboard> {
        self.slots
            .iter_mut()
            .find(|slot| slot.team == team)
            .map(|slot| &mut slot.board)
    }

    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.slots.iter().map(|slot| slot.team)
    }

    fn slot(&self, team: TeamId) -> Option<&TeamSlot> {
        self.slots.iter().find(|slot| slot.team == team)
    }

    /// Plays one round and advances the world turn.
    pub fn run_round(&mut self, world: &mut World) -> RoundReport {
        let turn = world.turn();
        let _span = tracing::info_span!("round", %turn).entered();

        let mut outcomes = Vec::new();
        for slot in &mut self.slots {
            slot.strategist.plan(world, &mut slot.board, slot.team);
            for unit in world.team_roster(slot.team) {
                let outcome = slot.controller.take_turn(world, &mut slot.board, unit);
                tracing::debug!(%unit, ?outcome, "turn finished");
                outcomes.push((unit, outcome));
            }
        }

        world.advance_turn();
        RoundReport { turn, outcomes }
    }

    /// Plays rounds until `max_rounds` have run or at most one team has
    /// living units.
    pub fn run(&mut self, world: &mut World, max_rounds: u32) -> Vec<RoundReport> {
        let mut reports = Vec::new();
        for _ in 0..max_rounds {
            if world.teams_alive().len() <= 1 {
                break;
            }
            reports.push(self.run_round(world));
        }
        let survivors = world.teams_alive();
        tracing::info!(rounds = reports.len(), ?survivors, "battle finished");
        reports
    }
}
