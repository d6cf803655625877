//! Structural equivalence of expression trees.
//!
//! Equivalence is a congruence over tree shape and payloads. It does not try to
//! decide whether two trees accept the same values: `GreaterThan(1)` and
//! `GreaterThanOrEqual(2)` are not equivalent even though they agree on every
//! integer.
//!
//! Two shape differences are tolerated:
//!
//! - conjunctions and disjunctions compare their children as multisets, so the
//!   order of children does not matter but their number does;
//! - an `In` criterion with a single accepted value is equivalent to the
//!   comparison it degenerates to: `Same(x)` when strict, `Equal(x)` when loose.
//!
//! Payloads compare with the equality of their node kind, except that a NaN
//! payload is identical to another NaN so that equivalence stays reflexive.

use crate::{
    coerce::loose_eq,
    expr::{Expr, Membership, Node},
    value::Value,
};

impl Expr {
    /// Whether `self` and `other` are structurally equivalent.
    ///
    /// # Examples
    ///
    /// ```
    /// use clove_criteria::Expr;
    ///
    /// let a = Expr::and([Expr::same(1), Expr::starts_with("x")]);
    /// let b = Expr::and([Expr::starts_with("x"), Expr::same(1)]);
    /// assert!(a.equivalent_to(&b));
    ///
    /// assert!(Expr::same("10").equivalent_to(&Expr::one_of(["10"])));
    /// assert!(!Expr::same("10").equivalent_to(&Expr::one_of(["10", "11"])));
    /// ```
    pub fn equivalent_to(&self, other: &Expr) -> bool {
        equivalent(self, other)
    }
}

/// Whether `a` and `b` are structurally equivalent.
pub fn equivalent(a: &Expr, b: &Expr) -> bool {
    if Expr::ptr_eq(a, b) {
        return true;
    }
    match (a.node(), b.node()) {
        (Node::Same(x), Node::Same(y)) | (Node::NotSame(x), Node::NotSame(y)) => identical(x, y),
        (Node::Equal(x), Node::Equal(y))
        | (Node::NotEqual(x), Node::NotEqual(y))
        | (Node::GreaterThan(x), Node::GreaterThan(y))
        | (Node::GreaterThanOrEqual(x), Node::GreaterThanOrEqual(y))
        | (Node::LessThan(x), Node::LessThan(y))
        | (Node::LessThanOrEqual(x), Node::LessThanOrEqual(y)) => loosely_identical(x, y),
        (Node::StartsWith(x), Node::StartsWith(y))
        | (Node::EndsWith(x), Node::EndsWith(y))
        | (Node::Contains(x), Node::Contains(y))
        | (Node::InstanceOf(x), Node::InstanceOf(y)) => x == y,
        (Node::Matches(x), Node::Matches(y)) => x == y,
        (Node::In(x), Node::In(y)) => same_membership(x, y),
        (Node::In(membership), Node::Same(value)) | (Node::Same(value), Node::In(membership)) => {
            membership.is_strict() && membership.single().is_some_and(|only| identical(only, value))
        }
        (Node::In(membership), Node::Equal(value))
        | (Node::Equal(value), Node::In(membership)) => {
            !membership.is_strict()
                && membership.single().is_some_and(|only| loosely_identical(only, value))
        }
        (Node::KeyExists(x), Node::KeyExists(y)) | (Node::KeyNotExists(x), Node::KeyNotExists(y)) => {
            x == y
        }
        (Node::Empty, Node::Empty)
        | (Node::NotEmpty, Node::NotEmpty)
        | (Node::AlwaysTrue, Node::AlwaysTrue)
        | (Node::AlwaysFalse, Node::AlwaysFalse) => true,
        (Node::Not(x), Node::Not(y)) => equivalent(x, y),
        (Node::And(x), Node::And(y)) | (Node::Or(x), Node::Or(y)) => same_multiset(x, y),
        (Node::Select(x), Node::Select(y)) => {
            x.projection().same_as(y.projection()) && equivalent(x.inner(), y.inner())
        }
        (Node::Quantify(x), Node::Quantify(y)) => {
            x.quantity() == y.quantity() && equivalent(x.inner(), y.inner())
        }
        (Node::Custom(x), Node::Custom(y)) => x.equivalent_to(y.as_ref()),
        _ => false,
    }
}

fn same_membership(a: &Membership, b: &Membership) -> bool {
    a.is_strict() == b.is_strict()
        && a.values().len() == b.values().len()
        && a.values()
            .iter()
            .zip(b.values())
            .all(|(x, y)| {
                if a.is_strict() { identical(x, y) } else { loosely_identical(x, y) }
            })
}

/// Identity equality with NaN identical to NaN.
pub(crate) fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| identical(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, l)| y.get(key).is_some_and(|r| identical(l, r)))
        }
        _ => a == b,
    }
}

fn loosely_identical(a: &Value, b: &Value) -> bool {
    identical(a, b) || loose_eq(a, b)
}

/// Whether the children can be paired one-to-one with pairwise equivalent
/// partners.
///
/// Loose equality is not transitive, so a greedy pairing can miss a valid one;
/// this searches for a perfect matching with augmenting paths instead.
fn same_multiset(left: &[Expr], right: &[Expr]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let edges: Vec<Vec<bool>> = left
        .iter()
        .map(|l| right.iter().map(|r| equivalent(l, r)).collect())
        .collect();

    // owner[j] is the index in `left` currently paired with right[j]
    let mut owner: Vec<Option<usize>> = vec![None; right.len()];
    for i in 0..left.len() {
        let mut visited = vec![false; right.len()];
        if !augment(i, &edges, &mut owner, &mut visited) {
            return false;
        }
    }
    true
}

fn augment(
    i: usize,
    edges: &[Vec<bool>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for j in 0..owner.len() {
        if visited[j] || !edges[i][j] {
            continue;
        }
        visited[j] = true;
        let free = match owner[j] {
            None => true,
            Some(k) => augment(k, edges, owner, visited),
        };
        if free {
            owner[j] = Some(i);
            return true;
        }
    }
    false
}
