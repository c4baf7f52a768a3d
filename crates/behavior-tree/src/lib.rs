//! Lightweight behavior tree for turn-based controllers.
//!
//! Trees are described declaratively as a [`NodeSpec`] (leaf names are plain
//! strings, so specs can live in data files) and then resolved once into a
//! [`Node`] whose leaves are concrete handles. Resolution fails on the first
//! unknown leaf name, so a tree either binds completely at startup or not at
//! all.
//!
//! - **No Running state**: every tick completes immediately
//! - **No node-owned state**: the same tree can drive any number of agents
//! - **Zero dependencies** unless the `serde` feature is enabled
//!
//! # Architecture
//!
//! - [`Status`]: Success or Failure
//! - [`Leaf`]: what a bound leaf does when ticked against a context `C`
//! - [`Behavior`]: anything that can be ticked; implemented by [`Node`]
//! - [`NodeSpec`] + [`NodeSpec::resolve`]: name-based description and binding

pub mod behavior;
pub mod builder;
pub mod node;
pub mod spec;
pub mod status;

pub use behavior::{Behavior, Leaf};
pub use node::Node;
pub use spec::{LeafKind, NodeSpec, UnresolvedLeaf};
pub use status::Status;
