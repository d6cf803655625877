use crate::{coerce::loose_eq, value::Value};

/// The accepted values of an `In` criterion.
///
/// A strict membership compares candidates by identity, a loose one with
/// coercing equality. An empty set accepts nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    values: Vec<Value>,
    strict: bool,
}

impl Membership {
    pub fn new(values: Vec<Value>, strict: bool) -> Self {
        Membership { values, strict }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The only accepted value, if there is exactly one.
    pub fn single(&self) -> Option<&Value> {
        match self.values.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Compares two values with this membership's notion of equality.
    pub fn accepts_as_equal(&self, a: &Value, b: &Value) -> bool {
        if self.strict { a == b } else { loose_eq(a, b) }
    }

    /// Whether `candidate` is one of the accepted values.
    pub fn contains(&self, candidate: &Value) -> bool {
        self.values
            .iter()
            .any(|accepted| self.accepts_as_equal(candidate, accepted))
    }
}
