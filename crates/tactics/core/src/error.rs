//! Errors raised by the capability interface of [`World`](crate::World).
//!
//! Grid queries never fail: they answer with `false`, `None` or
//! [`PathLength::Unreachable`](crate::PathLength::Unreachable). Only commands
//! that would change unit state can be rejected.

use crate::skill::SkillId;
use crate::state::{Position, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("unit {0} is already on the battlefield")]
    DuplicateUnit(UnitId),

    #[error("unit {0} is dead")]
    DeadUnit(UnitId),

    #[error("skill {0} is not defined")]
    UnknownSkill(SkillId),

    #[error("unit {unit} does not know {skill}")]
    SkillNotKnown { unit: UnitId, skill: SkillId },

    #[error("{skill} is cooling down for {remaining} more turn(s)")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("{skill} needs {required} mana, unit has {available}")]
    InsufficientMana {
        skill: SkillId,
        required: u32,
        available: u32,
    },

    #[error("{skill} cannot target {target}")]
    InvalidSkillTarget { skill: SkillId, target: UnitId },

    #[error("destination {0} is outside the map or blocked")]
    BlockedDestination(Position),

    #[error("destination {0} is occupied")]
    OccupiedDestination(Position),

    #[error("destination {destination} is {distance:?} steps away, move range is {range}")]
    OutOfMoveRange {
        destination: Position,
        distance: Option<u32>,
        range: u32,
    },

    #[error("target {target} is {distance} tiles away, range is {range}")]
    OutOfRange {
        target: UnitId,
        distance: u32,
        range: u32,
    },

    #[error("no line of sight from {from} to {target}")]
    NoLineOfSight { from: UnitId, target: UnitId },

    #[error("{unit} cannot target ally {target}")]
    FriendlyTarget { unit: UnitId, target: UnitId },
}

impl CommandError {
    /// True for errors caused by the board changing under a stale decision
    /// (target moved, tile taken), as opposed to invalid requests.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CommandError::OccupiedDestination(_)
                | CommandError::OutOfRange { .. }
                | CommandError::NoLineOfSight { .. }
                | CommandError::DeadUnit(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_board_errors_are_recoverable() {
        assert!(CommandError::OccupiedDestination(Position::new(1, 1)).is_recoverable());
        assert!(CommandError::DeadUnit(UnitId(3)).is_recoverable());
        assert!(
            CommandError::OutOfRange {
                target: UnitId(3),
                distance: 4,
                range: 1
            }
            .is_recoverable()
        );

        assert!(!CommandError::UnknownSkill(SkillId(7)).is_recoverable());
        assert!(
            !CommandError::OnCooldown {
                skill: SkillId(1),
                remaining: 2
            }
            .is_recoverable()
        );
    }
}
