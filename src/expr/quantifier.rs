use std::fmt;

use crate::expr::Expr;

/// How the per-element results of a quantifier are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Every element matches (vacuously true for empty iterables)
    All,

    /// At least one element matches
    AtLeastOne,

    /// At least `n` elements match
    AtLeast(usize),

    /// No more than `n` elements match
    AtMost(usize),

    /// Exactly `n` elements match
    Exactly(usize),

    /// The inner expression is evaluated against the number of elements
    Count,
}

impl Quantity {
    pub fn bound(&self) -> Option<usize> {
        match self {
            Quantity::AtLeast(n) | Quantity::AtMost(n) | Quantity::Exactly(n) => Some(*n),
            Quantity::All | Quantity::AtLeastOne | Quantity::Count => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::All => "all",
            Quantity::AtLeastOne => "at least one",
            Quantity::AtLeast(_) => "at least",
            Quantity::AtMost(_) => "at most",
            Quantity::Exactly(_) => "exactly",
            Quantity::Count => "count",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound() {
            Some(n) => write!(f, "{} {}", self.name(), n),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// A quantity paired with the expression evaluated against each element.
#[derive(Debug, Clone)]
pub struct Quantifier {
    quantity: Quantity,
    inner: Expr,
}

impl Quantifier {
    pub(crate) fn new(quantity: Quantity, inner: Expr) -> Self {
        Quantifier { quantity, inner }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn inner(&self) -> &Expr {
        &self.inner
    }

    pub(crate) fn with_inner(&self, inner: Expr) -> Self {
        Quantifier {
            quantity: self.quantity,
            inner,
        }
    }
}
