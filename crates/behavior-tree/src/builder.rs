//! Shorthand constructors for writing specs in code.
//!
//! `sequence(vec![condition("low_health"), action("retreat")])` reads closer
//! to the tree it builds than the nested enum literals do.

use crate::NodeSpec;

#[inline]
pub fn sequence(children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::Sequence(children)
}

#[inline]
pub fn selector(children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::Selector(children)
}

#[inline]
pub fn invert(child: NodeSpec) -> NodeSpec {
    NodeSpec::Invert(Box::new(child))
}

#[inline]
pub fn always_succeed(child: NodeSpec) -> NodeSpec {
    NodeSpec::AlwaysSucceed(Box::new(child))
}

#[inline]
pub fn condition(name: impl Into<String>) -> NodeSpec {
    NodeSpec::Condition(name.into())
}

#[inline]
pub fn action(name: impl Into<String>) -> NodeSpec {
    NodeSpec::Action(name.into())
}
