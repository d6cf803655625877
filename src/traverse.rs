//! Visitor-based rewriting of expression trees.
//!
//! A [`Visitor`] sees every node twice: [`enter`](Visitor::enter) before the
//! node's children are visited and [`leave`](Visitor::leave) after. `enter`
//! can replace a node (the replacement is what gets descended into), `leave`
//! can replace it again or remove it by returning `None`.
//!
//! # Rebuilding Rules
//!
//! 1. A composite whose children all come back unchanged (same [`Expr`] handle)
//!    is kept as is, so untouched subtrees are shared with the input tree.
//! 2. A composite with at least one changed child is rebuilt from the new
//!    children. `And`/`Or` go through their flattening constructors.
//! 3. A composite that loses all of its children is removed, and its `leave`
//!    hook is not called. `Not`, selectors and quantifiers have one child, so
//!    losing it removes them. An `And`/`Or` with a single surviving child stays
//!    an `And`/`Or`.
//! 4. An `And`/`Or` that had no children to begin with is not removed.
//!
//! With several visitors, each one walks the tree produced by the previous one.
//! If a visitor removes the root, traversal stops and the result is `None`.
//!
//! # Examples
//!
//! Remove every `AlwaysTrue` leaf:
//!
//! ```
//! use clove_criteria::{Expr, ExprKind};
//! use clove_criteria::traverse::FnVisitor;
//! use std::convert::Infallible;
//!
//! let expr = Expr::and([Expr::always_true(), Expr::same(1)]);
//! let mut prune = FnVisitor::on_leave(|e: Expr| {
//!     Ok::<_, Infallible>((e.kind() != ExprKind::AlwaysTrue).then_some(e))
//! });
//!
//! let pruned = expr.traverse_with(&mut prune).unwrap().unwrap();
//! assert!(pruned.equivalent_to(&Expr::and([Expr::same(1)])));
//! ```

use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::expr::{Expr, Node};

/// Hooks called for every node of a traversal.
///
/// Both hooks default to returning their input unchanged. Errors are
/// propagated to the caller of [`traverse`] as they are.
pub trait Visitor {
    type Error;

    /// Called before the children of `expr` are visited. The returned node
    /// replaces `expr` and its children are the ones visited.
    fn enter(&mut self, expr: Expr) -> Result<Expr, Self::Error> {
        Ok(expr)
    }

    /// Called after the children of `expr` are visited. Returning `None`
    /// removes the node from its parent.
    fn leave(&mut self, expr: Expr) -> Result<Option<Expr>, Self::Error> {
        Ok(Some(expr))
    }
}

/// A [`Visitor`] made of two closures.
pub struct FnVisitor<E, En, Le> {
    enter: En,
    leave: Le,
    _error: PhantomData<fn() -> E>,
}

impl<E, En, Le> FnVisitor<E, En, Le>
where
    En: FnMut(Expr) -> Result<Expr, E>,
    Le: FnMut(Expr) -> Result<Option<Expr>, E>,
{
    pub fn new(enter: En, leave: Le) -> Self {
        FnVisitor {
            enter,
            leave,
            _error: PhantomData,
        }
    }
}

impl<E, En> FnVisitor<E, En, fn(Expr) -> Result<Option<Expr>, E>>
where
    En: FnMut(Expr) -> Result<Expr, E>,
{
    /// Visitor with only an `enter` hook.
    pub fn on_enter(enter: En) -> Self {
        Self::new(enter, |expr| Ok(Some(expr)))
    }
}

impl<E, Le> FnVisitor<E, fn(Expr) -> Result<Expr, E>, Le>
where
    Le: FnMut(Expr) -> Result<Option<Expr>, E>,
{
    /// Visitor with only a `leave` hook.
    pub fn on_leave(leave: Le) -> Self {
        Self::new(Ok, leave)
    }
}

impl<E, En, Le> Visitor for FnVisitor<E, En, Le>
where
    En: FnMut(Expr) -> Result<Expr, E>,
    Le: FnMut(Expr) -> Result<Option<Expr>, E>,
{
    type Error = E;

    fn enter(&mut self, expr: Expr) -> Result<Expr, E> {
        (self.enter)(expr)
    }

    fn leave(&mut self, expr: Expr) -> Result<Option<Expr>, E> {
        (self.leave)(expr)
    }
}

impl Expr {
    /// Traverses this expression with a single visitor.
    pub fn traverse_with<V: Visitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) -> Result<Option<Expr>, V::Error> {
        walk(self, visitor)
    }
}

/// Runs each visitor over the tree produced by the previous one.
///
/// Returns `Ok(None)` as soon as a visitor removes the root; the remaining
/// visitors are not run.
pub fn traverse<E>(
    root: &Expr,
    visitors: &mut [&mut dyn Visitor<Error = E>],
) -> Result<Option<Expr>, E> {
    let mut current = root.clone();
    for (pass, visitor) in visitors.iter_mut().enumerate() {
        debug!(pass, root = ?current.kind(), "starting visitor pass");
        match walk(&current, &mut **visitor)? {
            Some(next) => current = next,
            None => {
                debug!(pass, "root removed, skipping remaining visitors");
                return Ok(None);
            }
        }
    }
    Ok(Some(current))
}

enum Rebuilt {
    Unchanged,
    Changed(Expr),
    Removed,
}

fn walk<V: Visitor + ?Sized>(expr: &Expr, visitor: &mut V) -> Result<Option<Expr>, V::Error> {
    let entered = visitor.enter(expr.clone())?;
    if !Expr::ptr_eq(&entered, expr) {
        trace!(from = ?expr.kind(), to = ?entered.kind(), "node replaced on enter");
    }

    let rebuilt = match rebuild(&entered, visitor)? {
        Rebuilt::Unchanged => entered,
        Rebuilt::Changed(expr) => expr,
        Rebuilt::Removed => {
            trace!(kind = ?entered.kind(), "all children removed, removing composite");
            return Ok(None);
        }
    };

    let left = visitor.leave(rebuilt)?;
    if left.is_none() {
        trace!("node removed on leave");
    }
    Ok(left)
}

fn rebuild<V: Visitor + ?Sized>(expr: &Expr, visitor: &mut V) -> Result<Rebuilt, V::Error> {
    match expr.node() {
        Node::Not(inner) => single(inner, visitor, Expr::not),
        Node::Select(selector) => single(selector.inner(), visitor, |inner| {
            Expr::from_node(Node::Select(selector.with_inner(inner)))
        }),
        Node::Quantify(quantifier) => single(quantifier.inner(), visitor, |inner| {
            Expr::from_node(Node::Quantify(quantifier.with_inner(inner)))
        }),
        Node::And(children) => many(children, visitor, |next| Expr::and(next)),
        Node::Or(children) => many(children, visitor, |next| Expr::or(next)),
        _ => Ok(Rebuilt::Unchanged),
    }
}

fn single<V, F>(child: &Expr, visitor: &mut V, wrap: F) -> Result<Rebuilt, V::Error>
where
    V: Visitor + ?Sized,
    F: FnOnce(Expr) -> Expr,
{
    Ok(match walk(child, visitor)? {
        None => Rebuilt::Removed,
        Some(next) if Expr::ptr_eq(&next, child) => Rebuilt::Unchanged,
        Some(next) => Rebuilt::Changed(wrap(next)),
    })
}

fn many<V, F>(children: &[Expr], visitor: &mut V, wrap: F) -> Result<Rebuilt, V::Error>
where
    V: Visitor + ?Sized,
    F: FnOnce(Vec<Expr>) -> Expr,
{
    let mut changed = false;
    let mut next = Vec::with_capacity(children.len());
    for child in children {
        match walk(child, visitor)? {
            Some(visited) => {
                changed |= !Expr::ptr_eq(&visited, child);
                next.push(visited);
            }
            None => changed = true,
        }
    }

    Ok(if !changed {
        Rebuilt::Unchanged
    } else if next.is_empty() {
        Rebuilt::Removed
    } else {
        Rebuilt::Changed(wrap(next))
    })
}
