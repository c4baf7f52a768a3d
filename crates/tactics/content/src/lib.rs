//! Data-driven battle content and loaders.
//!
//! - Scenarios (map, skills, teams, units, objectives) from RON
//! - Decision tunables ([`DecisionConfig`](decision::DecisionConfig)) from TOML
//! - Behavior trees ([`NodeSpec`](behavior_tree::NodeSpec)) from RON
//!
//! Loaders validate while building: a scenario that loads is one the
//! [`World`](tactics_core::World) accepted unit by unit.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{ControllerSpec, Scenario, TeamSetup};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader, TreeLoader};
