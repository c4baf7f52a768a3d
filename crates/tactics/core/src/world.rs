//! Reference host for the agent capability interface.
//!
//! [`World`] owns the grid, the unit roster, the skill book and the turn
//! counter, and exposes the commands decision code is allowed to issue
//! (`move_unit`, `attack`, `use_skill_on_target`, `use_self_skill`, `idle`)
//! plus the read-only queries it scores with (`distance_between`, `can_see`,
//! `reachable_positions`). Effect resolution is deliberately flat: damage and
//! healing are applied as-is. Hosts with real combat rules can wrap or
//! replace it without touching the decision crate's scoring code.

use std::collections::BTreeSet;

use crate::error::CommandError;
use crate::grid::{GridMap, PathLength};
use crate::skill::{SkillBook, SkillEffect, SkillId, SkillSpec, SkillTarget};
use crate::state::{Position, TeamId, Turn, Unit, UnitId};

pub type CommandResult<T> = Result<T, CommandError>;

/// One human-readable line describing something that happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    pub turn: Turn,
    pub unit: UnitId,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct World {
    map: GridMap,
    units: Vec<Unit>,
    skills: SkillBook,
    turn: Turn,
    journal: Vec<JournalEntry>,
}

impl World {
    pub fn new(map: GridMap, skills: SkillBook) -> Self {
        Self {
            map,
            units: Vec::new(),
            skills,
            turn: Turn::ZERO,
            journal: Vec::new(),
        }
    }

    /// Places a unit on the map. Roster order is spawn order and fixes the
    /// order in which a team's units act.
    pub fn spawn(&mut self, unit: Unit) -> CommandResult<()> {
        if self.units.iter().any(|existing| existing.id == unit.id) {
            return Err(CommandError::DuplicateUnit(unit.id));
        }
        if !self.map.is_walkable(unit.position) {
            return Err(CommandError::BlockedDestination(unit.position));
        }
        if self.map.has_unit(unit.position) {
            return Err(CommandError::OccupiedDestination(unit.position));
        }
        if unit.is_alive() {
            self.map.set_unit(unit.position, unit.id);
        }
        self.units.push(unit);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn advance_turn(&mut self) -> Turn {
        self.turn = self.turn.next();
        self.turn
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Direct mutable access for hosts feeding in snapshot updates.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    /// Ids of a team's living units, in roster order.
    pub fn team_roster(&self, team: TeamId) -> Vec<UnitId> {
        self.living_units()
            .filter(|unit| unit.team == team)
            .map(|unit| unit.id)
            .collect()
    }

    /// Teams that still have at least one living unit.
    pub fn teams_alive(&self) -> BTreeSet<TeamId> {
        self.living_units().map(|unit| unit.team).collect()
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Path distance between two units' tiles.
    pub fn distance_between(&self, from: UnitId, to: UnitId) -> PathLength {
        match (self.unit(from), self.unit(to)) {
            (Some(a), Some(b)) => self.map.shortest_path_length(a.position, b.position),
            _ => PathLength::Unreachable,
        }
    }

    /// Both units alive and an unobstructed line between their tiles.
    pub fn can_see(&self, viewer: UnitId, other: UnitId) -> bool {
        match (self.unit(viewer), self.unit(other)) {
            (Some(a), Some(b)) if a.is_alive() && b.is_alive() => {
                self.map.has_line_of_sight(a.position, b.position)
            }
            _ => false,
        }
    }

    /// Unoccupied tiles the unit could move to this turn.
    pub fn reachable_positions(&self, id: UnitId) -> BTreeSet<Position> {
        let Some(unit) = self.unit(id).filter(|unit| unit.is_alive()) else {
            return BTreeSet::new();
        };
        self.map
            .reachable_positions(unit.position, unit.move_range)
            .into_iter()
            .filter(|position| !self.map.has_unit(*position))
            .collect()
    }

    pub fn is_skill_ready(&self, id: UnitId, skill: SkillId) -> bool {
        self.unit(id)
            .is_some_and(|unit| unit.is_skill_ready(skill))
    }

    /// Rebuilds the unit's visible enemy and ally lists by testing line of
    /// sight against every other living unit.
    pub fn refresh_visibility(&mut self, id: UnitId) {
        let Some(team) = self.unit(id).map(|viewer| viewer.team) else {
            return;
        };

        let mut enemies = Vec::new();
        let mut allies = Vec::new();
        for other in self.living_units().filter(|other| other.id != id) {
            if !self.can_see(id, other.id) {
                continue;
            }
            if other.team == team {
                allies.push(other.id);
            } else {
                enemies.push(other.id);
            }
        }

        if let Some(viewer) = self.unit_mut(id) {
            viewer.visible_enemies = enemies;
            viewer.visible_allies = allies;
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn log(&mut self, unit: UnitId, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(turn = %self.turn, %unit, "{message}");
        self.journal.push(JournalEntry {
            turn: self.turn,
            unit,
            message,
        });
    }

    /// Moves a unit along the grid. Returns the number of steps taken.
    pub fn move_unit(&mut self, id: UnitId, destination: Position) -> CommandResult<u32> {
        let unit = self.living_unit(id)?;
        let (origin, range) = (unit.position, unit.move_range);

        if !self.map.is_walkable(destination) {
            return Err(CommandError::BlockedDestination(destination));
        }
        if destination != origin && self.map.has_unit(destination) {
            return Err(CommandError::OccupiedDestination(destination));
        }
        let distance = self.map.shortest_path_length(origin, destination);
        if !distance.within(range) {
            return Err(CommandError::OutOfMoveRange {
                destination,
                distance: distance.steps(),
                range,
            });
        }

        self.map.remove_unit(origin);
        self.map.set_unit(destination, id);
        if let Some(unit) = self.unit_mut(id) {
            unit.position = destination;
        }
        Ok(distance.steps().unwrap_or(0))
    }

    /// Basic attack. Returns the damage dealt.
    pub fn attack(&mut self, id: UnitId, target: UnitId) -> CommandResult<u32> {
        let attacker = self.living_unit(id)?;
        let (power, range) = (attacker.attack_power, attacker.attack_range);
        self.check_offensive_target(id, target, range)?;
        Ok(self.apply_damage(target, power))
    }

    /// Casts an enemy-targeted skill. Returns the damage dealt on impact.
    pub fn use_skill_on_target(
        &mut self,
        id: UnitId,
        skill: SkillId,
        target: UnitId,
    ) -> CommandResult<u32> {
        let spec = self.castable_skill(id, skill)?.clone();
        if spec.target != SkillTarget::Enemy {
            return Err(CommandError::InvalidSkillTarget { skill, target });
        }
        self.check_offensive_target(id, target, spec.range)?;
        self.pay_for(id, &spec);

        let dealt = match spec.effect {
            SkillEffect::Damage(amount) => self.apply_damage(target, amount),
            SkillEffect::Debuff { damage, .. } => self.apply_damage(target, damage),
            SkillEffect::Heal(_) => 0,
        };
        Ok(dealt)
    }

    /// Casts a self-only skill. Returns the health restored.
    pub fn use_self_skill(&mut self, id: UnitId, skill: SkillId) -> CommandResult<u32> {
        let spec = self.castable_skill(id, skill)?.clone();
        if spec.target != SkillTarget::SelfOnly {
            return Err(CommandError::InvalidSkillTarget { skill, target: id });
        }
        self.pay_for(id, &spec);

        let restored = match (spec.effect, self.unit_mut(id)) {
            (SkillEffect::Heal(amount), Some(unit)) => unit.health.restore(amount),
            _ => 0,
        };
        Ok(restored)
    }

    pub fn idle(&mut self, id: UnitId) -> CommandResult<()> {
        self.living_unit(id).map(|_| ())
    }

    /// Bookkeeping after a unit has acted: cooldowns tick and the unit's
    /// turn counter advances.
    pub fn end_unit_turn(&mut self, id: UnitId) {
        if let Some(unit) = self.unit_mut(id) {
            unit.tick_cooldowns();
            unit.turns_taken += 1;
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn living_unit(&self, id: UnitId) -> CommandResult<&Unit> {
        let unit = self.unit(id).ok_or(CommandError::UnknownUnit(id))?;
        if !unit.is_alive() {
            return Err(CommandError::DeadUnit(id));
        }
        Ok(unit)
    }

    fn castable_skill(&self, id: UnitId, skill: SkillId) -> CommandResult<&SkillSpec> {
        let unit = self.living_unit(id)?;
        let spec = self
            .skills
            .get(skill)
            .ok_or(CommandError::UnknownSkill(skill))?;
        if !unit.knows_skill(skill) {
            return Err(CommandError::SkillNotKnown { unit: id, skill });
        }
        let remaining = unit.cooldown(skill);
        if remaining > 0 {
            return Err(CommandError::OnCooldown { skill, remaining });
        }
        if unit.mana.current < spec.mana_cost {
            return Err(CommandError::InsufficientMana {
                skill,
                required: spec.mana_cost,
                available: unit.mana.current,
            });
        }
        Ok(spec)
    }

    fn pay_for(&mut self, id: UnitId, spec: &SkillSpec) {
        if let Some(unit) = self.unit_mut(id) {
            unit.mana.drain(spec.mana_cost);
            unit.start_cooldown(spec.id, spec.cooldown);
        }
    }

    fn check_offensive_target(&self, id: UnitId, target: UnitId, range: u32) -> CommandResult<()> {
        let attacker = self.living_unit(id)?;
        let defender = self.living_unit(target)?;
        if !attacker.is_hostile_to(defender) {
            return Err(CommandError::FriendlyTarget { unit: id, target });
        }
        let distance = attacker.position.chebyshev_distance(defender.position);
        if distance > range {
            return Err(CommandError::OutOfRange {
                target,
                distance,
                range,
            });
        }
        if !self
            .map
            .has_line_of_sight(attacker.position, defender.position)
        {
            return Err(CommandError::NoLineOfSight { from: id, target });
        }
        Ok(())
    }

    fn apply_damage(&mut self, target: UnitId, amount: u32) -> u32 {
        let Some(unit) = self.unit_mut(target) else {
            return 0;
        };
        let dealt = unit.health.drain(amount);
        let (died, position) = (!unit.is_alive(), unit.position);
        if died {
            self.map.remove_unit(position);
            tracing::debug!(%target, "unit defeated");
        }
        dealt
    }
}
