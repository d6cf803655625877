use std::fmt;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::value::Value;

/// A leaf criterion defined outside this crate.
///
/// Implementations take part in evaluation and equivalence like the built-in
/// leaves. Use [`downcast_ref`](CustomPredicate::downcast_ref) in
/// [`equivalent_to`](CustomPredicate::equivalent_to) to compare against other
/// instances of the same concrete type.
///
/// # Examples
///
/// ```
/// use clove_criteria::{CustomPredicate, Expr, Value};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl CustomPredicate for Even {
///     fn evaluate(&self, value: &Value) -> bool {
///         matches!(value, Value::Integer(n) if n % 2 == 0)
///     }
///
///     fn equivalent_to(&self, other: &dyn CustomPredicate) -> bool {
///         other.downcast_ref::<Even>().is_some()
///     }
/// }
///
/// let even = Expr::custom(Even);
/// assert!(even.evaluate(&Value::Integer(4)));
/// assert!(even.equivalent_to(&Expr::custom(Even)));
/// ```
pub trait CustomPredicate: DowncastSync + fmt::Debug {
    /// Whether the value satisfies this criterion. Must not panic.
    fn evaluate(&self, value: &Value) -> bool;

    /// Structural equivalence with another custom leaf.
    fn equivalent_to(&self, other: &dyn CustomPredicate) -> bool;
}
impl_downcast!(sync CustomPredicate);
