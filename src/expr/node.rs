use std::{fmt, ops::Deref, slice, sync::Arc};

use strum::{EnumDiscriminants, EnumIs};

use crate::{
    expr::{CustomPredicate, Membership, Pattern, Quantifier, Selector},
    value::{Key, Value},
};

/// A single node of the expression tree.
///
/// Nodes are only ever reached through an [`Expr`] handle, which keeps
/// `And`/`Or` flattened and validates payloads on construction.
#[derive(Debug, Clone, EnumIs, EnumDiscriminants)]
#[strum_discriminants(derive(PartialOrd, Ord, Hash))]
#[strum_discriminants(name(ExprKind))]
#[strum_discriminants(vis(pub))]
pub enum Node {
    // Comparisons
    /// Identity comparison (`=== value`)
    ///
    /// Matches only values of the same type with the same payload.
    Same(Value),

    /// Negated identity comparison (`!== value`)
    NotSame(Value),

    /// Coercing comparison (`== value`)
    ///
    /// # Example
    /// ```text
    /// Equal(10) matches "10", 10 and 10.0
    /// ```
    Equal(Value),

    /// Negated coercing comparison (`!= value`)
    NotEqual(Value),

    /// Coercing ordering (`> value`)
    GreaterThan(Value),

    /// Coercing ordering (`>= value`)
    GreaterThanOrEqual(Value),

    /// Coercing ordering (`< value`)
    LessThan(Value),

    /// Coercing ordering (`<= value`)
    LessThanOrEqual(Value),

    // Strings
    /// String prefix test
    StartsWith(String),

    /// String suffix test
    EndsWith(String),

    /// Substring test
    Contains(String),

    /// Regular expression search (unanchored unless the pattern anchors itself)
    Matches(Pattern),

    // Membership and shape
    /// Value is one of a set of accepted values
    In(Membership),

    /// Falsy-emptiness test (null, `false`, zero, `""`, `[]`, `{}`)
    Empty,

    /// Negated emptiness test
    NotEmpty,

    /// Host object is an instance of the named class
    InstanceOf(String),

    /// Keyed container has an entry for the key
    KeyExists(Key),

    /// Keyed container has no entry for the key
    KeyNotExists(Key),

    // Constants
    AlwaysTrue,
    AlwaysFalse,

    // Combinators
    /// Negation
    Not(Expr),

    /// Conjunction, vacuously true when empty
    And(Vec<Expr>),

    /// Disjunction, vacuously false when empty
    Or(Vec<Expr>),

    // Projections
    /// Evaluates an inner expression against a projected sub-value
    Select(Selector),

    /// Evaluates an inner expression against each element of an iterable value
    Quantify(Quantifier),

    /// Leaf kind defined outside this crate
    Custom(Arc<dyn CustomPredicate>),
}

/// Shared handle to an immutable expression node.
///
/// Cloning is cheap. `Expr` has no `PartialEq`: use [`Expr::ptr_eq`] for
/// identity and [`Expr::equivalent_to`] for structural equivalence.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

impl Expr {
    /// Wraps a node, splicing same-kind children of `And`/`Or` into their parent.
    pub(crate) fn from_node(node: Node) -> Self {
        let node = match node {
            Node::And(children) => Node::And(splice(children, ExprKind::And)),
            Node::Or(children) => Node::Or(splice(children, ExprKind::Or)),
            other => other,
        };
        Expr(Arc::new(node))
    }

    /// The node this handle points at.
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Kind discriminator of the node.
    pub fn kind(&self) -> ExprKind {
        ExprKind::from(self.node())
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Child expressions of a composite node, empty for leaves.
    pub fn children(&self) -> &[Expr] {
        match self.node() {
            Node::Not(inner) => slice::from_ref(inner),
            Node::And(children) | Node::Or(children) => children,
            Node::Select(selector) => slice::from_ref(selector.inner()),
            Node::Quantify(quantifier) => slice::from_ref(quantifier.inner()),
            _ => &[],
        }
    }

    /// The single inner expression of `Not`, selectors and quantifiers.
    pub fn inner(&self) -> Option<&Expr> {
        match self.node() {
            Node::Not(inner) => Some(inner),
            Node::Select(selector) => Some(selector.inner()),
            Node::Quantify(quantifier) => Some(quantifier.inner()),
            _ => None,
        }
    }

    /// Compared value of a comparison node.
    pub fn value(&self) -> Option<&Value> {
        match self.node() {
            Node::Same(v)
            | Node::NotSame(v)
            | Node::Equal(v)
            | Node::NotEqual(v)
            | Node::GreaterThan(v)
            | Node::GreaterThanOrEqual(v)
            | Node::LessThan(v)
            | Node::LessThanOrEqual(v) => Some(v),
            _ => None,
        }
    }

    /// Literal of a `StartsWith`, `EndsWith` or `Contains` node.
    pub fn literal(&self) -> Option<&str> {
        match self.node() {
            Node::StartsWith(s) | Node::EndsWith(s) | Node::Contains(s) => Some(s),
            _ => None,
        }
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        match self.node() {
            Node::Matches(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn membership(&self) -> Option<&Membership> {
        match self.node() {
            Node::In(membership) => Some(membership),
            _ => None,
        }
    }

    /// Key of a key-existence node or of a key selector.
    pub fn target_key(&self) -> Option<&Key> {
        match self.node() {
            Node::KeyExists(key) | Node::KeyNotExists(key) => Some(key),
            Node::Select(selector) => selector.projection().key(),
            _ => None,
        }
    }

    /// Class name of an `InstanceOf` node.
    pub fn class_name(&self) -> Option<&str> {
        match self.node() {
            Node::InstanceOf(name) => Some(name),
            _ => None,
        }
    }

    /// Bound of an `AtLeast`, `AtMost` or `Exactly` quantifier.
    pub fn bound(&self) -> Option<usize> {
        match self.node() {
            Node::Quantify(quantifier) => quantifier.quantity().bound(),
            _ => None,
        }
    }
}

fn splice(children: Vec<Expr>, kind: ExprKind) -> Vec<Expr> {
    if !children.iter().any(|child| child.kind() == kind) {
        return children;
    }
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        if child.kind() == kind {
            flat.extend(child.children().iter().cloned());
        } else {
            flat.push(child);
        }
    }
    flat
}

impl Deref for Expr {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Node> for Expr {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}
