//! Constructors for every node kind.
//!
//! Constructors that cannot be misused return [`Expr`] directly. Those with a
//! payload that can be invalid (patterns, names, bounds) return
//! `Result<Expr, ExprError>`.

use std::sync::Arc;

use crate::{
    config::PatternConfig,
    error::ExprError,
    expr::{
        CustomPredicate, Expr, Membership, Node, Pattern, Projection, Projector, Quantifier,
        Quantity, Selector,
    },
    value::{Key, Value},
};

fn non_empty(name: String, what: &'static str) -> Result<String, ExprError> {
    if name.is_empty() {
        return Err(ExprError::EmptyName { what });
    }
    Ok(name)
}

impl Expr {
    // Comparisons

    /// Matches values identical to `value` (same type, same payload).
    pub fn same(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::Same(value.into()))
    }

    pub fn not_same(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::NotSame(value.into()))
    }

    /// Matches values loosely equal to `value` (`"10"` equals `10`).
    pub fn equal(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::Equal(value.into()))
    }

    pub fn not_equal(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::NotEqual(value.into()))
    }

    pub fn greater_than(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::GreaterThan(value.into()))
    }

    pub fn greater_than_or_equal(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::GreaterThanOrEqual(value.into()))
    }

    pub fn less_than(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::LessThan(value.into()))
    }

    pub fn less_than_or_equal(value: impl Into<Value>) -> Expr {
        Expr::from_node(Node::LessThanOrEqual(value.into()))
    }

    // Strings

    pub fn starts_with(prefix: impl Into<String>) -> Expr {
        Expr::from_node(Node::StartsWith(prefix.into()))
    }

    pub fn ends_with(suffix: impl Into<String>) -> Expr {
        Expr::from_node(Node::EndsWith(suffix.into()))
    }

    pub fn contains(needle: impl Into<String>) -> Expr {
        Expr::from_node(Node::Contains(needle.into()))
    }

    /// Regular expression search with default options.
    ///
    /// # Errors
    ///
    /// [`ExprError::InvalidPattern`] if the pattern does not compile.
    pub fn matches(pattern: &str) -> Result<Expr, ExprError> {
        Expr::matches_with(pattern, &PatternConfig::default())
    }

    pub fn matches_with(pattern: &str, config: &PatternConfig) -> Result<Expr, ExprError> {
        Ok(Expr::from_node(Node::Matches(Pattern::new(pattern, config)?)))
    }

    // Membership and shape

    /// Matches values identical to one of `values`.
    pub fn one_of<I, V>(values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::in_values(values, true)
    }

    /// Matches values loosely equal to one of `values`.
    pub fn one_of_loose<I, V>(values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::in_values(values, false)
    }

    pub fn in_values<I, V>(values: I, strict: bool) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Expr::from_node(Node::In(Membership::new(values, strict)))
    }

    pub fn empty() -> Expr {
        Expr::from_node(Node::Empty)
    }

    pub fn not_empty() -> Expr {
        Expr::from_node(Node::NotEmpty)
    }

    /// Matches host objects that are instances of `class`.
    ///
    /// # Errors
    ///
    /// [`ExprError::EmptyName`] if `class` is empty.
    pub fn instance_of(class: impl Into<String>) -> Result<Expr, ExprError> {
        let class = non_empty(class.into(), "class")?;
        Ok(Expr::from_node(Node::InstanceOf(class)))
    }

    pub fn key_exists(key: impl Into<Key>) -> Expr {
        Expr::from_node(Node::KeyExists(key.into()))
    }

    pub fn key_not_exists(key: impl Into<Key>) -> Expr {
        Expr::from_node(Node::KeyNotExists(key.into()))
    }

    // Constants

    pub fn always_true() -> Expr {
        Expr::from_node(Node::AlwaysTrue)
    }

    pub fn always_false() -> Expr {
        Expr::from_node(Node::AlwaysFalse)
    }

    // Combinators

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Expr {
        Expr::from_node(Node::Not(inner))
    }

    /// Conjunction. Nested conjunctions are spliced into this one.
    pub fn and(children: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::from_node(Node::And(children.into_iter().collect()))
    }

    /// Disjunction. Nested disjunctions are spliced into this one.
    pub fn or(children: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::from_node(Node::Or(children.into_iter().collect()))
    }

    /// `self AND other`
    pub fn and_also(self, other: Expr) -> Expr {
        Expr::and([self, other])
    }

    /// `self OR other`
    pub fn or_else(self, other: Expr) -> Expr {
        Expr::or([self, other])
    }

    // Selectors

    /// Evaluates `inner` against the entry at `key`.
    pub fn key(key: impl Into<Key>, inner: Expr) -> Expr {
        Expr::select(Projection::Key(key.into()), inner)
    }

    /// Evaluates `inner` against a property of a host object.
    ///
    /// # Errors
    ///
    /// [`ExprError::EmptyName`] if `name` is empty.
    pub fn property(name: impl Into<String>, inner: Expr) -> Result<Expr, ExprError> {
        let name = non_empty(name.into(), "property")?;
        Ok(Expr::select(Projection::Property(name), inner))
    }

    /// Evaluates `inner` against the result of calling a method of a host object.
    ///
    /// # Errors
    ///
    /// [`ExprError::EmptyName`] if `name` is empty.
    pub fn method(
        name: impl Into<String>,
        args: Vec<Value>,
        inner: Expr,
    ) -> Result<Expr, ExprError> {
        let name = non_empty(name.into(), "method")?;
        Ok(Expr::select(Projection::Method { name, args }, inner))
    }

    /// Evaluates `inner` against the result of a custom projection.
    pub fn project(projector: impl Projector, inner: Expr) -> Expr {
        Expr::select(Projection::Custom(Arc::new(projector)), inner)
    }

    fn select(projection: Projection, inner: Expr) -> Expr {
        Expr::from_node(Node::Select(Selector::new(projection, inner)))
    }

    // Quantifiers

    pub fn all(inner: Expr) -> Expr {
        Expr::quantify(Quantity::All, inner)
    }

    pub fn at_least_one(inner: Expr) -> Expr {
        Expr::quantify(Quantity::AtLeastOne, inner)
    }

    /// # Errors
    ///
    /// [`ExprError::InvalidBound`] if `n` is zero.
    pub fn at_least(n: usize, inner: Expr) -> Result<Expr, ExprError> {
        if n == 0 {
            return Err(ExprError::InvalidBound {
                quantity: Quantity::AtLeast(n).name(),
                bound: n,
            });
        }
        Ok(Expr::quantify(Quantity::AtLeast(n), inner))
    }

    pub fn at_most(n: usize, inner: Expr) -> Expr {
        Expr::quantify(Quantity::AtMost(n), inner)
    }

    pub fn exactly(n: usize, inner: Expr) -> Expr {
        Expr::quantify(Quantity::Exactly(n), inner)
    }

    /// Evaluates `inner` against the number of elements.
    pub fn count(inner: Expr) -> Expr {
        Expr::quantify(Quantity::Count, inner)
    }

    fn quantify(quantity: Quantity, inner: Expr) -> Expr {
        Expr::from_node(Node::Quantify(Quantifier::new(quantity, inner)))
    }

    // Extension

    pub fn custom(predicate: impl CustomPredicate) -> Expr {
        Expr::from_node(Node::Custom(Arc::new(predicate)))
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::not(self)
    }
}
