//! Resolved tree nodes.

use crate::{Behavior, Leaf, Status};

/// A behavior tree whose leaves are bound handles of type `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<L> {
    /// Ticks children left to right, stopping at the first failure (AND).
    Sequence(Vec<Node<L>>),
    /// Ticks children left to right, stopping at the first success (OR).
    Selector(Vec<Node<L>>),
    /// Flips the child's status (NOT).
    Inverter(Box<Node<L>>),
    /// Ticks the child and reports success regardless of its status.
    AlwaysSucceed(Box<Node<L>>),
    Leaf(L),
}

impl<L> Node<L> {
    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Sequence(children) | Node::Selector(children) => {
                children.iter().map(Node::leaf_count).sum()
            }
            Node::Inverter(child) | Node::AlwaysSucceed(child) => child.leaf_count(),
            Node::Leaf(_) => 1,
        }
    }
}

impl<C: ?Sized, L: Leaf<C>> Behavior<C> for Node<L> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self {
            // An empty sequence has nothing to fail.
            Node::Sequence(children) => {
                for child in children {
                    if child.tick(ctx).is_failure() {
                        return Status::Failure;
                    }
                }
                Status::Success
            }
            // An empty selector has nothing to succeed.
            Node::Selector(children) => {
                for child in children {
                    if child.tick(ctx).is_success() {
                        return Status::Success;
                    }
                }
                Status::Failure
            }
            Node::Inverter(child) => child.tick(ctx).invert(),
            Node::AlwaysSucceed(child) => {
                let _ = child.tick(ctx);
                Status::Success
            }
            Node::Leaf(leaf) => leaf.tick(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: i32,
        trace: Vec<&'static str>,
    }

    enum Op {
        Add(&'static str),
        Fail(&'static str),
        IsPositive,
    }

    impl Leaf<Counter> for Op {
        fn tick(&self, ctx: &mut Counter) -> Status {
            match self {
                Op::Add(name) => {
                    ctx.value += 1;
                    ctx.trace.push(*name);
                    Status::Success
                }
                Op::Fail(name) => {
                    ctx.trace.push(*name);
                    Status::Failure
                }
                Op::IsPositive => Status::from(ctx.value > 0),
            }
        }
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let tree = Node::Sequence(vec![
            Node::Leaf(Op::Add("a")),
            Node::Leaf(Op::Fail("b")),
            Node::Leaf(Op::Add("c")),
        ]);
        let mut ctx = Counter::default();

        assert_eq!(tree.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.trace, vec!["a", "b"]);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let tree = Node::Selector(vec![
            Node::Leaf(Op::Fail("a")),
            Node::Leaf(Op::Add("b")),
            Node::Leaf(Op::Add("c")),
        ]);
        let mut ctx = Counter::default();

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.trace, vec!["a", "b"]);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn selector_fails_when_every_child_fails() {
        let tree = Node::Selector(vec![Node::Leaf(Op::Fail("a")), Node::Leaf(Op::Fail("b"))]);
        assert_eq!(tree.tick(&mut Counter::default()), Status::Failure);
    }

    #[test]
    fn inverter_and_always_succeed() {
        let guard = Node::Inverter(Box::new(Node::Leaf(Op::IsPositive)));
        let mut ctx = Counter::default();
        assert_eq!(guard.tick(&mut ctx), Status::Success);

        let swallow = Node::AlwaysSucceed(Box::new(Node::Leaf(Op::Fail("x"))));
        assert_eq!(swallow.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.trace, vec!["x"]);
    }

    #[test]
    fn leaf_count_walks_whole_tree() {
        let tree: Node<Op> = Node::Selector(vec![
            Node::Sequence(vec![Node::Leaf(Op::IsPositive), Node::Leaf(Op::Add("a"))]),
            Node::Inverter(Box::new(Node::Leaf(Op::Fail("b")))),
        ]);
        assert_eq!(tree.leaf_count(), 3);
    }
}
