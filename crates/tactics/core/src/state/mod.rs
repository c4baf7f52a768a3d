//! Plain data describing who is on the battlefield and where.

mod common;
mod unit;

pub use common::{Position, ResourceMeter, TeamId, Turn, UnitId};
pub use unit::Unit;
