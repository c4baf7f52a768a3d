//! Team-level planning that runs once per round, before the team's units act.

use tactics_core::{Blackboard, ObjectiveKind, TeamId, UnitId, World};

/// Keeps the team blackboard's focus target and objectives current.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamStrategist;

impl TeamStrategist {
    pub fn new() -> Self {
        Self
    }

    /// Refreshes visibility for the team, then:
    /// - keeps the focus target while it is alive and seen by someone,
    ///   otherwise picks the seen enemy with the lowest health ratio (lowest
    ///   id on ties), or clears the focus when nothing is seen;
    /// - retires Capture objectives whose tile a teammate now stands on.
    pub fn plan(&self, world: &mut World, board: &mut Blackboard, team: TeamId) {
        let roster = world.team_roster(team);
        for &unit in &roster {
            world.refresh_visibility(unit);
        }

        let seen = spotted_enemies(world, &roster);
        self.choose_focus(world, board, team, &seen);
        retire_captured(world, board, team);
    }

    fn choose_focus(&self, world: &World, board: &mut Blackboard, team: TeamId, seen: &[UnitId]) {
        if let Some(current) = board.focus_target()
            && seen.contains(&current)
        {
            return;
        }

        let weakest = seen
            .iter()
            .filter_map(|id| world.unit(*id))
            .min_by(|a, b| {
                a.health_ratio()
                    .total_cmp(&b.health_ratio())
                    .then(a.id.cmp(&b.id))
            });

        match weakest {
            Some(target) => {
                tracing::debug!(%team, target = %target.id, "focus target chosen");
                board.set_focus_target(target.id);
            }
            None => board.clear_focus_target(),
        }
    }
}

/// Living enemies visible to any of `roster`, deduplicated, in first-seen order.
fn spotted_enemies(world: &World, roster: &[UnitId]) -> Vec<UnitId> {
    let mut seen = Vec::new();
    for unit in roster.iter().filter_map(|id| world.unit(*id)) {
        for enemy in &unit.visible_enemies {
            let alive = world.unit(*enemy).is_some_and(|e| e.is_alive());
            if alive && !seen.contains(enemy) {
                seen.push(*enemy);
            }
        }
    }
    seen
}

fn retire_captured(world: &World, board: &mut Blackboard, team: TeamId) {
    board.retain_objectives(|objective| {
        let captured = objective.kind == ObjectiveKind::Capture
            && objective.target.is_some_and(|tile| {
                world
                    .map()
                    .unit_at(tile)
                    .and_then(|id| world.unit(id))
                    .is_some_and(|holder| holder.team == team)
            });
        if captured {
            tracing::info!(%team, kind = %objective.kind, "objective achieved");
        }
        !captured
    });
}
