//! Declarative tree descriptions and leaf binding.

use std::fmt;

use crate::Node;

/// A tree whose leaves are still names.
///
/// With the `serde` feature enabled this deserializes from data files, e.g. in RON:
///
/// ```text
/// Selector([
///     Sequence([Condition("low_health"), Action("retreat")]),
///     Action("attack"),
///     Action("idle"),
/// ])
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSpec {
    Sequence(Vec<NodeSpec>),
    Selector(Vec<NodeSpec>),
    Invert(Box<NodeSpec>),
    AlwaysSucceed(Box<NodeSpec>),
    Condition(String),
    Action(String),
}

/// Which kind of leaf a name referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Condition,
    Action,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafKind::Condition => f.write_str("condition"),
            LeafKind::Action => f.write_str("action"),
        }
    }
}

/// A leaf name the resolver had no binding for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedLeaf {
    pub kind: LeafKind,
    pub name: String,
}

impl fmt::Display for UnresolvedLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {} registered under `{}`", self.kind, self.name)
    }
}

impl std::error::Error for UnresolvedLeaf {}

impl NodeSpec {
    /// Binds every leaf name through `bind`, stopping at the first name it
    /// rejects. Returning `None` from `bind` marks the name as unknown.
    pub fn resolve<L, F>(&self, bind: &mut F) -> Result<Node<L>, UnresolvedLeaf>
    where
        F: FnMut(LeafKind, &str) -> Option<L>,
    {
        let node = match self {
            NodeSpec::Sequence(children) => Node::Sequence(resolve_all(children, bind)?),
            NodeSpec::Selector(children) => Node::Selector(resolve_all(children, bind)?),
            NodeSpec::Invert(child) => Node::Inverter(Box::new(child.resolve(bind)?)),
            NodeSpec::AlwaysSucceed(child) => Node::AlwaysSucceed(Box::new(child.resolve(bind)?)),
            NodeSpec::Condition(name) => Node::Leaf(bind_leaf(LeafKind::Condition, name, bind)?),
            NodeSpec::Action(name) => Node::Leaf(bind_leaf(LeafKind::Action, name, bind)?),
        };
        Ok(node)
    }

    /// Every (kind, name) pair mentioned in this tree, depth first.
    pub fn leaf_names(&self) -> Vec<(LeafKind, &str)> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<(LeafKind, &'a str)>) {
        match self {
            NodeSpec::Sequence(children) | NodeSpec::Selector(children) => {
                for child in children {
                    child.collect_names(out);
                }
            }
            NodeSpec::Invert(child) | NodeSpec::AlwaysSucceed(child) => child.collect_names(out),
            NodeSpec::Condition(name) => out.push((LeafKind::Condition, name)),
            NodeSpec::Action(name) => out.push((LeafKind::Action, name)),
        }
    }
}

fn resolve_all<L, F>(children: &[NodeSpec], bind: &mut F) -> Result<Vec<Node<L>>, UnresolvedLeaf>
where
    F: FnMut(LeafKind, &str) -> Option<L>,
{
    children.iter().map(|child| child.resolve(bind)).collect()
}

fn bind_leaf<L, F>(kind: LeafKind, name: &str, bind: &mut F) -> Result<L, UnresolvedLeaf>
where
    F: FnMut(LeafKind, &str) -> Option<L>,
{
    bind(kind, name).ok_or_else(|| UnresolvedLeaf {
        kind,
        name: name.to_owned(),
    })
}
