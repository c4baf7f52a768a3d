//! Battlefield data model shared by the decision engine and its hosts.
//!
//! `tactics-core` defines the grid (terrain, occupancy, A* distance, line of
//! sight), the unit and skill model, the shared team [`Blackboard`], and the
//! reference [`World`] host that implements the agent capability interface.
//! Nothing here decides anything; the `decision` crate does that on top of
//! these types.
pub mod blackboard;
pub mod error;
pub mod grid;
pub mod skill;
pub mod state;
pub mod world;

pub use blackboard::{Blackboard, BlackboardValue, DebuffRecord, Objective, ObjectiveKind};
pub use error::CommandError;
pub use grid::{Cell, GridMap, MapDimensions, PathLength, Terrain};
pub use skill::{DebuffKind, SkillBook, SkillEffect, SkillId, SkillSpec, SkillTarget};
pub use state::{Position, ResourceMeter, TeamId, Turn, Unit, UnitId};
pub use world::{CommandResult, JournalEntry, World};
