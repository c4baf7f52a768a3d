//! Core traits.
//!
//! [`Leaf`] is implemented by the host's bound leaf type (a condition or an
//! action handle). [`Behavior`] is implemented by whole trees. Keeping the
//! leaf type free of lifetimes lets a tree built once at startup be ticked
//! against short-lived contexts that borrow the world for a single turn.

use crate::Status;

/// A bound leaf evaluated against a context.
pub trait Leaf<C: ?Sized> {
    fn tick(&self, ctx: &mut C) -> Status;
}

/// A node (or tree) that can be evaluated against a context.
pub trait Behavior<C: ?Sized> {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C: ?Sized, B: Behavior<C> + ?Sized> Behavior<C> for Box<B> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
