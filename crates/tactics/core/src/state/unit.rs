use std::collections::BTreeMap;

use crate::skill::SkillId;

use super::{Position, ResourceMeter, TeamId, UnitId};

/// Snapshot of a single unit as seen by the decision core.
///
/// Visibility lists are refreshed by the controller once per turn via
/// [`World::refresh_visibility`](crate::World::refresh_visibility); the unit
/// never updates them itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub team: TeamId,
    pub position: Position,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub attack_power: u32,
    /// Chebyshev reach of the basic attack.
    pub attack_range: u32,
    /// Maximum path length covered by a single move.
    pub move_range: u32,
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    cooldowns: BTreeMap<SkillId, u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visible_enemies: Vec<UnitId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visible_allies: Vec<UnitId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turns_taken: u32,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, team: TeamId, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            position,
            health: ResourceMeter::full(100),
            mana: ResourceMeter::full(0),
            attack_power: 10,
            attack_range: 1,
            move_range: 3,
            skills: Vec::new(),
            cooldowns: BTreeMap::new(),
            visible_enemies: Vec::new(),
            visible_allies: Vec::new(),
            turns_taken: 0,
        }
    }

    pub fn with_health(mut self, current: u32, maximum: u32) -> Self {
        self.health = ResourceMeter::new(current, maximum);
        self
    }

    pub fn with_mana(mut self, current: u32, maximum: u32) -> Self {
        self.mana = ResourceMeter::new(current, maximum);
        self
    }

    pub fn with_attack(mut self, power: u32, range: u32) -> Self {
        self.attack_power = power;
        self.attack_range = range;
        self
    }

    pub fn with_move_range(mut self, range: u32) -> Self {
        self.move_range = range;
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn health_ratio(&self) -> f32 {
        self.health.ratio()
    }

    pub fn knows_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }

    /// True when the unit knows the skill and it is off cooldown.
    pub fn is_skill_ready(&self, skill: SkillId) -> bool {
        self.knows_skill(skill) && self.cooldown(skill) == 0
    }

    pub fn cooldown(&self, skill: SkillId) -> u32 {
        self.cooldowns.get(&skill).copied().unwrap_or(0)
    }

    pub fn start_cooldown(&mut self, skill: SkillId, turns: u32) {
        if turns == 0 {
            self.cooldowns.remove(&skill);
        } else {
            self.cooldowns.insert(skill, turns);
        }
    }

    /// Decrements every running cooldown by one turn.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });
    }

    pub fn is_hostile_to(&self, other: &Unit) -> bool {
        self.team != other.team
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldowns_expire_after_ticks() {
        let mut unit = Unit::new(UnitId(1), "mage", TeamId(0), Position::ORIGIN)
            .with_skills([SkillId(3)]);
        assert!(unit.is_skill_ready(SkillId(3)));

        unit.start_cooldown(SkillId(3), 2);
        assert!(!unit.is_skill_ready(SkillId(3)));

        unit.tick_cooldowns();
        assert_eq!(unit.cooldown(SkillId(3)), 1);
        unit.tick_cooldowns();
        assert!(unit.is_skill_ready(SkillId(3)));
    }

    #[test]
    fn unknown_skill_is_never_ready() {
        let unit = Unit::new(UnitId(1), "grunt", TeamId(0), Position::ORIGIN);
        assert!(!unit.is_skill_ready(SkillId(9)));
    }
}
