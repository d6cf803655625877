use crate::expr::{Expr, ExprKind};

/// Which combinator a [`CombinatorBuilder`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    /// Conjunction (`And`)
    All,
    /// Disjunction (`Or`)
    Any,
}

impl Junction {
    fn kind(self) -> ExprKind {
        match self {
            Junction::All => ExprKind::And,
            Junction::Any => ExprKind::Or,
        }
    }
}

/// Collects children for a conjunction or disjunction before freezing them into
/// an immutable [`Expr`].
///
/// The builder is the only mutable stage: nothing it holds can be evaluated until
/// [`build`](CombinatorBuilder::build) is called.
///
/// # Examples
///
/// ```
/// use clove_criteria::{CombinatorBuilder, Expr, Value};
///
/// let mut any = CombinatorBuilder::any();
/// any.push_unique(Expr::same("red"));
/// any.push_unique(Expr::one_of(["red"])); // equivalent to the first, skipped
/// any.push_unique(Expr::same("blue"));
/// assert_eq!(any.len(), 2);
///
/// let expr = any.build();
/// assert!(expr.evaluate(&Value::from("blue")));
/// ```
#[derive(Debug, Clone)]
pub struct CombinatorBuilder {
    junction: Junction,
    children: Vec<Expr>,
}

impl CombinatorBuilder {
    pub fn new(junction: Junction) -> Self {
        CombinatorBuilder {
            junction,
            children: Vec::new(),
        }
    }

    /// Builder for a conjunction.
    pub fn all() -> Self {
        CombinatorBuilder::new(Junction::All)
    }

    /// Builder for a disjunction.
    pub fn any() -> Self {
        CombinatorBuilder::new(Junction::Any)
    }

    pub fn junction(&self) -> Junction {
        self.junction
    }

    pub fn push(&mut self, expr: Expr) -> &mut Self {
        self.children.push(expr);
        self
    }

    /// Appends `expr` unless an equivalent child is already present.
    ///
    /// A child of the same combinator kind is merged child by child. Returns
    /// whether anything was appended.
    pub fn push_unique(&mut self, expr: Expr) -> bool {
        if expr.kind() == self.junction.kind() {
            let mut pushed = false;
            for child in expr.children() {
                pushed |= self.push_unique(child.clone());
            }
            return pushed;
        }
        if self.children.iter().any(|child| child.equivalent_to(&expr)) {
            return false;
        }
        self.children.push(expr);
        true
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Freezes the collected children into an `And` or `Or` node.
    pub fn build(self) -> Expr {
        match self.junction {
            Junction::All => Expr::and(self.children),
            Junction::Any => Expr::or(self.children),
        }
    }
}

impl Extend<Expr> for CombinatorBuilder {
    fn extend<T: IntoIterator<Item = Expr>>(&mut self, iter: T) {
        self.children.extend(iter);
    }
}
