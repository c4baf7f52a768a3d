//! Error types for the decision crate.
//!
//! Construction errors ([`ControllerError`], [`ScriptError`]) surface at
//! startup. [`ActionError`] is produced while executing a chosen action and
//! never escapes a controller turn: the controller logs it and falls back.

use behavior_tree::UnresolvedLeaf;
use tactics_core::CommandError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("`{action}` needs a {field} in its context")]
    MissingContext {
        action: &'static str,
        field: &'static str,
    },

    #[error("`{action}` has no usable skill")]
    NoUsableSkill { action: &'static str },
}

impl ActionError {
    /// True when the host rejected a command because the board moved on
    /// since the decision was scored.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ActionError::Command(error) => error.is_recoverable(),
            ActionError::MissingContext { .. } | ActionError::NoUsableSkill { .. } => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("action `{0}` is registered twice")]
    DuplicateAction(String),

    #[error("designated {role} action `{name}` is not registered")]
    UnknownDesignatedAction { role: &'static str, name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("behavior tree references an unregistered leaf: {0}")]
    Unresolved(#[from] UnresolvedLeaf),

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Position, UnitId};

    #[test]
    fn only_stale_host_rejections_are_recoverable() {
        let taken = ActionError::from(CommandError::OccupiedDestination(Position::new(2, 2)));
        assert!(taken.is_recoverable());

        let unknown = ActionError::from(CommandError::UnknownUnit(UnitId(9)));
        assert!(!unknown.is_recoverable());

        let missing = ActionError::MissingContext {
            action: "attack",
            field: "target",
        };
        assert!(!missing.is_recoverable());
    }
}
