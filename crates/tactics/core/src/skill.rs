//! Skill definitions consumed by units and utility actions.
//!
//! The decision core only needs enough of a skill to score it: who it can
//! target, how far it reaches, what it costs, and what it does. Resolving the
//! effect is the host's job (see [`World`](crate::World)).

use std::collections::BTreeMap;
use std::fmt;

/// Identifier for a skill in the [`SkillBook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill-{}", self.0)
    }
}

/// Debuff categories tracked on the shared blackboard.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffKind {
    Slow,
    Poison,
    Weaken,
    Silence,
    Stun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillTarget {
    /// Cast on a visible enemy within range.
    Enemy,
    /// Cast on the caster itself.
    SelfOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    Damage(u32),
    Heal(u32),
    /// Applies a debuff for `duration` turns, dealing `damage` on impact.
    Debuff {
        kind: DebuffKind,
        duration: u32,
        damage: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    pub id: SkillId,
    pub name: String,
    pub target: SkillTarget,
    pub effect: SkillEffect,
    /// Maximum Chebyshev distance to the target. Ignored for self skills.
    pub range: u32,
    pub mana_cost: u32,
    /// Turns the skill stays unavailable after use.
    pub cooldown: u32,
}

impl SkillSpec {
    pub fn is_offensive(&self) -> bool {
        self.target == SkillTarget::Enemy
    }

    pub fn heal_amount(&self) -> Option<u32> {
        match self.effect {
            SkillEffect::Heal(amount) => Some(amount),
            _ => None,
        }
    }

    pub fn debuff(&self) -> Option<(DebuffKind, u32)> {
        match self.effect {
            SkillEffect::Debuff { kind, duration, .. } => Some((kind, duration)),
            _ => None,
        }
    }
}

/// Registry of every skill known to the battle, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillBook {
    skills: BTreeMap<SkillId, SkillSpec>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a skill, replacing any previous definition with the same id.
    pub fn insert(&mut self, spec: SkillSpec) -> Option<SkillSpec> {
        self.skills.insert(spec.id, spec)
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillSpec> {
        self.skills.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillSpec> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<SkillSpec> for SkillBook {
    fn from_iter<I: IntoIterator<Item = SkillSpec>>(iter: I) -> Self {
        let mut book = SkillBook::new();
        for spec in iter {
            book.insert(spec);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debuff_kind_names_round_trip_through_strum() {
        let name: &'static str = DebuffKind::Poison.into();
        assert_eq!(name, "poison");
        assert_eq!("slow".parse::<DebuffKind>().unwrap(), DebuffKind::Slow);
    }

    #[test]
    fn later_insert_replaces_definition() {
        let mut book = SkillBook::new();
        let spec = SkillSpec {
            id: SkillId(1),
            name: "bolt".into(),
            target: SkillTarget::Enemy,
            effect: SkillEffect::Damage(5),
            range: 4,
            mana_cost: 3,
            cooldown: 1,
        };
        assert!(book.insert(spec.clone()).is_none());
        let stronger = SkillSpec {
            effect: SkillEffect::Damage(9),
            ..spec
        };
        assert!(book.insert(stronger).is_some());
        assert_eq!(book.get(SkillId(1)).unwrap().effect, SkillEffect::Damage(9));
        assert_eq!(book.len(), 1);
    }
}
