//! Scoring context for utility evaluation.
//!
//! [`ActionContext`] is the owned, per-candidate description of *what* an
//! action would do (move where, hit whom, with which skill). [`AiContext`]
//! bundles one candidate with read-only views of the world, the team
//! blackboard and the acting unit, and is what considerations score.
//!
//! Scoring never mutates anything: the context holds shared references only,
//! so debuff lookups go through the non-evicting
//! [`Blackboard::has_debuff`].

use std::fmt;

use tactics_core::{
    Blackboard, GridMap, PathLength, Position, SkillId, SkillSpec, Turn, Unit, UnitId, World,
};

/// One concrete way of carrying out an action.
///
/// Actions without a context generator are evaluated against the implicit
/// context, which names only the acting unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionContext {
    pub agent: UnitId,
    pub destination: Option<Position>,
    pub target: Option<UnitId>,
    pub skill: Option<SkillId>,
}

impl ActionContext {
    pub fn implicit(agent: UnitId) -> Self {
        Self {
            agent,
            destination: None,
            target: None,
            skill: None,
        }
    }

    pub fn with_destination(mut self, destination: Position) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_target(mut self, target: UnitId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_skill(mut self, skill: SkillId) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn is_implicit(&self) -> bool {
        self.destination.is_none() && self.target.is_none() && self.skill.is_none()
    }
}

impl fmt::Display for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_implicit() {
            return f.write_str("implicit");
        }
        let mut parts = Vec::with_capacity(3);
        if let Some(destination) = self.destination {
            parts.push(format!("destination={destination}"));
        }
        if let Some(target) = self.target {
            parts.push(format!("target={target}"));
        }
        if let Some(skill) = self.skill {
            parts.push(format!("skill={skill}"));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Read-only view handed to considerations and action preconditions.
#[derive(Clone, Copy)]
pub struct AiContext<'a> {
    pub world: &'a World,
    pub board: &'a Blackboard,
    pub agent: &'a Unit,
    pub action: &'a ActionContext,
}

impl<'a> AiContext<'a> {
    pub fn new(
        world: &'a World,
        board: &'a Blackboard,
        agent: &'a Unit,
        action: &'a ActionContext,
    ) -> Self {
        Self {
            world,
            board,
            agent,
            action,
        }
    }

    pub fn map(&self) -> &'a GridMap {
        self.world.map()
    }

    pub fn now(&self) -> Turn {
        self.world.turn()
    }

    /// The candidate's target unit, if it names one that exists.
    pub fn target(&self) -> Option<&'a Unit> {
        self.action.target.and_then(|id| self.world.unit(id))
    }

    /// The candidate's skill, if it names one the skill book knows.
    pub fn skill(&self) -> Option<&'a SkillSpec> {
        self.action.skill.and_then(|id| self.world.skills().get(id))
    }

    /// Where the agent would stand after the action: the candidate's
    /// destination, or its current tile.
    pub fn standing_position(&self) -> Position {
        self.action.destination.unwrap_or(self.agent.position)
    }

    /// Living enemies in the agent's current visibility list.
    pub fn visible_enemies(&self) -> impl Iterator<Item = &'a Unit> + 'a {
        let (world, agent) = (self.world, self.agent);
        agent
            .visible_enemies
            .iter()
            .filter_map(move |id| world.unit(*id))
            .filter(|unit| unit.is_alive())
    }

    /// The team's focus target when it is alive.
    pub fn focus_target(&self) -> Option<&'a Unit> {
        self.board
            .focus_target()
            .and_then(|id| self.world.unit(id))
            .filter(|unit| unit.is_alive())
    }

    pub fn path_length(&self, from: Position, to: Position) -> PathLength {
        self.map().shortest_path_length(from, to)
    }

    /// Position the agent is trying to close on: the focus target, or the
    /// nearest visible enemy by path distance (roster order breaks ties).
    pub fn point_of_interest(&self) -> Option<Position> {
        if let Some(focus) = self.focus_target() {
            return Some(focus.position);
        }
        let mut nearest: Option<(u32, Position)> = None;
        for enemy in self.visible_enemies() {
            let Some(steps) = self.world.distance_between(self.agent.id, enemy.id).steps() else {
                continue;
            };
            if nearest.is_none_or(|(best, _)| steps < best) {
                nearest = Some((steps, enemy.position));
            }
        }
        nearest.map(|(_, position)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{MapDimensions, SkillBook, TeamId};

    #[test]
    fn display_lists_present_fields() {
        let ctx = ActionContext::implicit(UnitId(1));
        assert_eq!(ctx.to_string(), "implicit");

        let ctx = ctx.with_destination(Position::new(2, 3)).with_target(UnitId(4));
        assert_eq!(ctx.to_string(), "destination=(2, 3) target=#4");
    }

    #[test]
    fn point_of_interest_prefers_focus_then_nearest() {
        let map = GridMap::new(MapDimensions::new(8, 8));
        let mut world = World::new(map, SkillBook::new());
        let agent = Unit::new(UnitId(1), "agent", TeamId(0), Position::new(0, 0));
        world.spawn(agent).unwrap();
        world
            .spawn(Unit::new(UnitId(2), "far", TeamId(1), Position::new(6, 6)))
            .unwrap();
        world
            .spawn(Unit::new(UnitId(3), "near", TeamId(1), Position::new(2, 1)))
            .unwrap();
        world.refresh_visibility(UnitId(1));

        let mut board = Blackboard::new();
        let action = ActionContext::implicit(UnitId(1));
        let agent = world.unit(UnitId(1)).unwrap();
        let ctx = AiContext::new(&world, &board, agent, &action);
        assert_eq!(ctx.point_of_interest(), Some(Position::new(2, 1)));

        board.set_focus_target(UnitId(2));
        let ctx = AiContext::new(&world, &board, agent, &action);
        assert_eq!(ctx.point_of_interest(), Some(Position::new(6, 6)));
    }
}
