//! Stock action handlers.
//!
//! Each handler validates against the same [`World`](tactics_core::World)
//! commands it issues, so a context that passed `can_execute` during scoring
//! only fails at execution time if the world changed in between.

mod combat;
mod idle;
mod movement;
mod support;

pub use combat::{AttackHandler, SkillStrikeHandler};
pub use idle::IdleHandler;
pub use movement::{MoveHandler, RetreatHandler};
pub use support::HealSelfHandler;
