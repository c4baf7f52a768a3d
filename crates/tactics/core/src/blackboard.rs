//! Shared team blackboard.
//!
//! Cross-agent decision state: the team's focus target, debuffs the team has
//! applied (with expiry), ranked global objectives, and a loosely-typed
//! key/value store for ad-hoc signaling between components.
//!
//! Agents of a team are processed one after another, so a write made by one
//! agent is visible to the next agent within the same turn.

use std::collections::BTreeMap;

use crate::skill::{DebuffKind, SkillId};
use crate::state::{Position, Turn, UnitId};

/// Bookkeeping for a debuff applied to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffRecord {
    pub source_skill: SkillId,
    pub applied_at: Turn,
    /// First turn at which the debuff no longer applies.
    pub expires_at: Turn,
}

impl DebuffRecord {
    pub fn is_active(&self, now: Turn) -> bool {
        now < self.expires_at
    }

    pub fn remaining(&self, now: Turn) -> u32 {
        self.expires_at.0.saturating_sub(now.0)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveKind {
    /// Take and hold the target tile.
    Capture,
    /// Keep enemies away from the target tile.
    Defend,
    /// Push the team toward aggression in general.
    Assault,
    /// Gather around the target tile.
    Regroup,
}

/// A team-wide goal. Only the highest-priority objective is consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub priority: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<Position>,
}

impl Objective {
    pub const fn new(kind: ObjectiveKind, priority: u8) -> Self {
        Self {
            kind,
            priority,
            target: None,
        }
    }

    pub const fn at(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }
}

/// Values stored in the generic key/value section.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackboardValue {
    Flag(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Unit(UnitId),
    Position(Position),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blackboard {
    focus_target: Option<UnitId>,
    debuffs: BTreeMap<(UnitId, DebuffKind), DebuffRecord>,
    objectives: Vec<Objective>,
    entries: BTreeMap<String, BlackboardValue>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Focus target
    // ========================================================================

    pub fn set_focus_target(&mut self, target: UnitId) {
        self.focus_target = Some(target);
    }

    pub fn clear_focus_target(&mut self) {
        self.focus_target = None;
    }

    pub fn focus_target(&self) -> Option<UnitId> {
        self.focus_target
    }

    // ========================================================================
    // Debuffs
    // ========================================================================

    /// Records a debuff lasting `duration` turns from `now`. A later call for
    /// the same (target, kind) pair replaces the record.
    pub fn set_debuff(
        &mut self,
        target: UnitId,
        kind: DebuffKind,
        source_skill: SkillId,
        duration: u32,
        now: Turn,
    ) {
        self.debuffs.insert(
            (target, kind),
            DebuffRecord {
                source_skill,
                applied_at: now,
                expires_at: now + duration,
            },
        );
    }

    /// Reads a debuff record, evicting it when it has expired by `now`.
    pub fn get_debuff_info(
        &mut self,
        target: UnitId,
        kind: DebuffKind,
        now: Turn,
    ) -> Option<DebuffRecord> {
        let record = *self.debuffs.get(&(target, kind))?;
        if record.is_active(now) {
            Some(record)
        } else {
            self.debuffs.remove(&(target, kind));
            tracing::trace!(%target, %kind, expired_at = %record.expires_at, "debuff evicted");
            None
        }
    }

    /// Read-only view used while scoring. Expired records read as absent
    /// but stay stored until the next [`get_debuff_info`](Self::get_debuff_info).
    pub fn active_debuff(&self, target: UnitId, kind: DebuffKind, now: Turn) -> Option<&DebuffRecord> {
        self.debuffs
            .get(&(target, kind))
            .filter(|record| record.is_active(now))
    }

    pub fn has_debuff(&self, target: UnitId, kind: DebuffKind, now: Turn) -> bool {
        self.active_debuff(target, kind, now).is_some()
    }

    /// Number of stored debuff records, expired ones included.
    pub fn debuff_count(&self) -> usize {
        self.debuffs.len()
    }

    // ========================================================================
    // Objectives
    // ========================================================================

    /// Inserts keeping the list ranked by priority, highest first. Equal
    /// priorities keep insertion order.
    pub fn push_objective(&mut self, objective: Objective) {
        let slot = self
            .objectives
            .iter()
            .position(|existing| existing.priority < objective.priority)
            .unwrap_or(self.objectives.len());
        self.objectives.insert(slot, objective);
    }

    pub fn top_objective(&self) -> Option<&Objective> {
        self.objectives.first()
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn retain_objectives(&mut self, keep: impl FnMut(&Objective) -> bool) {
        self.objectives.retain(keep);
    }

    pub fn clear_objectives(&mut self) {
        self.objectives.clear();
    }

    // ========================================================================
    // Generic key/value store
    // ========================================================================

    pub fn get(&self, key: &str) -> Option<&BlackboardValue> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: BlackboardValue) -> Option<BlackboardValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn delete(&mut self, key: &str) -> Option<BlackboardValue> {
        self.entries.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debuff_expires_and_is_evicted_on_read() {
        let mut board = Blackboard::new();
        let target = UnitId(4);
        board.set_debuff(target, DebuffKind::Slow, SkillId(2), 3, Turn(10));

        let info = board.get_debuff_info(target, DebuffKind::Slow, Turn(12));
        assert_eq!(
            info,
            Some(DebuffRecord {
                source_skill: SkillId(2),
                applied_at: Turn(10),
                expires_at: Turn(13),
            })
        );
        assert_eq!(board.debuff_count(), 1);

        assert_eq!(board.get_debuff_info(target, DebuffKind::Slow, Turn(13)), None);
        assert_eq!(board.debuff_count(), 0);
    }

    #[test]
    fn read_only_view_hides_expired_without_evicting() {
        let mut board = Blackboard::new();
        board.set_debuff(UnitId(1), DebuffKind::Poison, SkillId(1), 1, Turn(0));

        assert!(board.has_debuff(UnitId(1), DebuffKind::Poison, Turn(0)));
        assert!(!board.has_debuff(UnitId(1), DebuffKind::Poison, Turn(1)));
        assert_eq!(board.debuff_count(), 1);
    }

    #[test]
    fn objectives_ranked_highest_first_stable_on_ties() {
        let mut board = Blackboard::new();
        board.push_objective(Objective::new(ObjectiveKind::Regroup, 1));
        board.push_objective(Objective::new(ObjectiveKind::Capture, 5).at(Position::new(2, 2)));
        board.push_objective(Objective::new(ObjectiveKind::Defend, 5));

        let kinds: Vec<_> = board.objectives().iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![ObjectiveKind::Capture, ObjectiveKind::Defend, ObjectiveKind::Regroup]
        );
        assert_eq!(board.top_objective().unwrap().kind, ObjectiveKind::Capture);

        board.clear_objectives();
        assert!(board.top_objective().is_none());
    }

    #[test]
    fn generic_entries() {
        let mut board = Blackboard::new();
        assert!(!board.has("rally"));
        board.set("rally", BlackboardValue::Position(Position::new(1, 1)));
        assert!(board.has("rally"));
        assert_eq!(
            board.delete("rally"),
            Some(BlackboardValue::Position(Position::new(1, 1)))
        );
        assert!(board.get("rally").is_none());
    }

    #[test]
    fn focus_target_round_trip() {
        let mut board = Blackboard::new();
        assert_eq!(board.focus_target(), None);
        board.set_focus_target(UnitId(9));
        assert_eq!(board.focus_target(), Some(UnitId(9)));
        board.clear_focus_target();
        assert_eq!(board.focus_target(), None);
    }
}
