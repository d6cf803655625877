use std::{borrow::Cow, fmt, sync::Arc};

use downcast_rs::{DowncastSync, impl_downcast};

use crate::{
    equivalence::identical,
    expr::Expr,
    value::{Key, Value},
};

/// Extracts a sub-value for a selector defined outside this crate.
///
/// Returning `None` from [`project`](Projector::project) makes the selector
/// evaluate to `false`.
pub trait Projector: DowncastSync + fmt::Debug {
    fn project(&self, value: &Value) -> Option<Value>;

    /// Whether `other` projects the same sub-value as `self`.
    fn same_projection(&self, other: &dyn Projector) -> bool;
}
impl_downcast!(sync Projector);

/// How a selector reaches the sub-value it tests.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Entry of an object or element of an array
    Key(Key),

    /// Public property of a host object
    Property(String),

    /// Result of calling a method on a host object
    Method { name: String, args: Vec<Value> },

    /// Projection defined outside this crate
    Custom(Arc<dyn Projector>),
}

impl Projection {
    /// Projects `value`, or returns `None` when the projection is impossible.
    pub fn project<'a>(&self, value: &'a Value) -> Option<Cow<'a, Value>> {
        match (self, value) {
            (Projection::Key(key), _) => value.get(key).map(Cow::Borrowed),
            (Projection::Property(name), Value::Instance(instance)) => {
                instance.property(name).map(Cow::Owned)
            }
            (Projection::Method { name, args }, Value::Instance(instance)) => {
                instance.call(name, args).map(Cow::Owned)
            }
            (Projection::Property(_) | Projection::Method { .. }, _) => None,
            (Projection::Custom(projector), _) => projector.project(value).map(Cow::Owned),
        }
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            Projection::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Same kind, same key or name, identical arguments.
    pub fn same_as(&self, other: &Projection) -> bool {
        match (self, other) {
            (Projection::Key(a), Projection::Key(b)) => a == b,
            (Projection::Property(a), Projection::Property(b)) => a == b,
            (
                Projection::Method { name: a, args: a_args },
                Projection::Method { name: b, args: b_args },
            ) => {
                a == b
                    && a_args.len() == b_args.len()
                    && a_args.iter().zip(b_args).all(|(x, y)| identical(x, y))
            }
            (Projection::Custom(a), Projection::Custom(b)) => a.same_projection(b.as_ref()),
            _ => false,
        }
    }
}

/// A projection paired with the expression evaluated against its result.
#[derive(Debug, Clone)]
pub struct Selector {
    projection: Projection,
    inner: Expr,
}

impl Selector {
    pub(crate) fn new(projection: Projection, inner: Expr) -> Self {
        Selector { projection, inner }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn inner(&self) -> &Expr {
        &self.inner
    }

    /// Same projection over a different inner expression.
    pub(crate) fn with_inner(&self, inner: Expr) -> Self {
        Selector {
            projection: self.projection.clone(),
            inner,
        }
    }
}
