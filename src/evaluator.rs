//! Evaluation of criteria against runtime values.
//!
//! Evaluation is total. Whenever a criterion cannot be applied to a value (an
//! ordering against an object, a key lookup on a string, a quantifier over a
//! scalar, a property of something that is not a host object) the criterion
//! does not match and the result is `false`.

use std::{
    cmp::Ordering,
    ops::ControlFlow::{self, Break, Continue},
};

use tracing::trace;

use crate::{
    coerce::{compare, loose_eq, to_match_string},
    expr::{Expr, Node, Quantifier, Quantity, Selector},
    value::Value,
};

impl Expr {
    /// Evaluates this expression against `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clove_criteria::{Expr, Value};
    /// use serde_json::json;
    ///
    /// let expr = Expr::key("age", Expr::greater_than(0));
    ///
    /// assert!(expr.evaluate(&json!({"age": 35}).into()));
    /// assert!(!expr.evaluate(&json!({"age": -1}).into()));
    /// assert!(!expr.evaluate(&json!({}).into()));
    /// ```
    pub fn evaluate(&self, value: &Value) -> bool {
        evaluate(self, value)
    }
}

/// Evaluates `expr` against `value`.
pub fn evaluate(expr: &Expr, value: &Value) -> bool {
    match expr.node() {
        Node::Same(expected) => value == expected,
        Node::NotSame(expected) => value != expected,
        Node::Equal(expected) => loose_eq(value, expected),
        Node::NotEqual(expected) => !loose_eq(value, expected),
        Node::GreaterThan(bound) => compare(value, bound) == Some(Ordering::Greater),
        Node::GreaterThanOrEqual(bound) => {
            matches!(compare(value, bound), Some(Ordering::Greater | Ordering::Equal))
        }
        Node::LessThan(bound) => compare(value, bound) == Some(Ordering::Less),
        Node::LessThanOrEqual(bound) => {
            matches!(compare(value, bound), Some(Ordering::Less | Ordering::Equal))
        }
        Node::StartsWith(prefix) => value.as_str().is_some_and(|s| s.starts_with(prefix.as_str())),
        Node::EndsWith(suffix) => value.as_str().is_some_and(|s| s.ends_with(suffix.as_str())),
        Node::Contains(needle) => value.as_str().is_some_and(|s| s.contains(needle.as_str())),
        Node::Matches(pattern) => to_match_string(value).is_some_and(|s| pattern.is_match(&s)),
        Node::In(membership) => membership.contains(value),
        Node::Empty => value.is_empty(),
        Node::NotEmpty => !value.is_empty(),
        Node::InstanceOf(class) => match value {
            Value::Instance(instance) => instance.is_instance_of(class),
            _ => false,
        },
        Node::KeyExists(key) => value.get(key).is_some(),
        Node::KeyNotExists(key) => value.is_keyed() && value.get(key).is_none(),
        Node::AlwaysTrue => true,
        Node::AlwaysFalse => false,
        Node::Not(inner) => !evaluate(inner, value),
        Node::And(children) => children.iter().all(|child| evaluate(child, value)),
        Node::Or(children) => children.iter().any(|child| evaluate(child, value)),
        Node::Select(selector) => select(selector, value),
        Node::Quantify(quantifier) => quantify(quantifier, value),
        Node::Custom(predicate) => predicate.evaluate(value),
    }
}

fn select(selector: &Selector, value: &Value) -> bool {
    match selector.projection().project(value) {
        Some(projected) => evaluate(selector.inner(), &projected),
        None => {
            trace!(
                projection = ?selector.projection(),
                value_type = value.type_name(),
                "projection impossible, selector does not match"
            );
            false
        }
    }
}

/// Feeds each element of an iterable value to `visit` until it breaks.
///
/// Returns `None` when the value is not iterable.
fn scan<F>(value: &Value, mut visit: F) -> Option<ControlFlow<bool>>
where
    F: FnMut(&Value) -> ControlFlow<bool>,
{
    let flow = match value {
        Value::Array(items) => items.iter().try_for_each(&mut visit),
        Value::Object(map) => map.values().try_for_each(&mut visit),
        Value::Instance(instance) => instance.elements()?.iter().try_for_each(&mut visit),
        _ => return None,
    };
    Some(flow)
}

fn quantify(quantifier: &Quantifier, value: &Value) -> bool {
    let inner = quantifier.inner();
    let flow = match quantifier.quantity() {
        Quantity::Count => {
            return match value.len() {
                Some(len) => evaluate(inner, &Value::from(len)),
                None => {
                    trace!(value_type = value.type_name(), "count of a non-iterable value");
                    false
                }
            };
        }
        Quantity::All => scan(value, |item| {
            if evaluate(inner, item) { Continue(()) } else { Break(false) }
        })
        .map(|flow| flow.break_value().unwrap_or(true)),
        Quantity::AtLeastOne => at_least(1, inner, value),
        Quantity::AtLeast(n) => at_least(n, inner, value),
        Quantity::AtMost(n) => {
            let mut matched = 0;
            scan(value, |item| {
                if evaluate(inner, item) {
                    matched += 1;
                    if matched > n {
                        return Break(false);
                    }
                }
                Continue(())
            })
            .map(|flow| flow.break_value().unwrap_or(true))
        }
        Quantity::Exactly(n) => {
            let mut matched = 0;
            let flow = scan(value, |item| {
                if evaluate(inner, item) {
                    matched += 1;
                    if matched > n {
                        return Break(false);
                    }
                }
                Continue(())
            });
            flow.map(|flow| flow.break_value().unwrap_or(matched == n))
        }
    };
    flow.unwrap_or_else(|| {
        trace!(
            quantity = %quantifier.quantity(),
            value_type = value.type_name(),
            "quantifier over a non-iterable value"
        );
        false
    })
}

fn at_least(n: usize, inner: &Expr, value: &Value) -> Option<bool> {
    let mut matched = 0;
    let flow = scan(value, |item| {
        if evaluate(inner, item) {
            matched += 1;
            if matched >= n {
                return Break(true);
            }
        }
        Continue(())
    });
    flow.map(|flow| flow.break_value().unwrap_or(matched >= n))
}
