//! Coercing comparisons between runtime values.
//!
//! Loose equality and ordering follow the usual dynamic-language rules: numbers
//! compare numerically whatever their representation, numeric strings compare as
//! numbers, and booleans and null compare through emptiness. Mixed integer/float
//! comparisons go through [`Decimal`] so that large integers are not rounded to
//! the nearest `f64` before comparing.
//!
//! # Examples
//!
//! ```
//! use clove_criteria::coerce::{compare, loose_eq};
//! use clove_criteria::Value;
//! use std::cmp::Ordering;
//!
//! assert!(loose_eq(&Value::from("10"), &Value::from(10)));
//! assert!(loose_eq(&Value::Null, &Value::Boolean(false)));
//! assert_eq!(compare(&Value::from("9"), &Value::from("10")), Some(Ordering::Less));
//! ```

use std::{borrow::Cow, cmp::Ordering, sync::Arc};

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::value::Value;

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Number> {
        match value {
            Value::Integer(n) => Some(Number::Int(*n)),
            Value::Float(n) => Some(Number::Float(*n)),
            _ => None,
        }
    }

    fn render(self) -> String {
        match self {
            Number::Int(n) => n.to_string(),
            Number::Float(n) => n.to_string(),
        }
    }
}

/// Parses a numeric string: optional surrounding ASCII whitespace around a
/// decimal integer or float literal, exponents allowed.
fn parse_numeric(s: &str) -> Option<Number> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Number::Int(n));
    }
    // f64 parsing also accepts "inf" and "NaN", which are not numeric strings
    let literal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !literal || !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// Exact integer/float ordering.
///
/// `from_f64_retain` flushes floats below `Decimal`'s scale to zero, so the
/// decimal path is only taken when the conversion round-trips. Floats that do
/// not round-trip are below 2^53 in magnitude, out of `Decimal` range, NaN or
/// infinite, and plain `f64` ordering against an `i64` is exact for all of them.
fn cmp_mixed(int: i64, float: f64) -> Option<Ordering> {
    if let Some(fd) = Decimal::from_f64_retain(float)
        && fd.to_f64() == Some(float)
    {
        return Some(Decimal::from(int).cmp(&fd));
    }
    (int as f64).partial_cmp(&float)
}

fn cmp_numbers(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Some(x.cmp(&y)),
        (Number::Float(x), Number::Float(y)) => x.partial_cmp(&y),
        (Number::Int(x), Number::Float(y)) => cmp_mixed(x, y),
        (Number::Float(x), Number::Int(y)) => cmp_mixed(y, x).map(Ordering::reverse),
    }
}

fn cmp_strings(a: &str, b: &str) -> Option<Ordering> {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => cmp_numbers(x, y),
        _ => Some(a.as_bytes().cmp(b.as_bytes())),
    }
}

/// Number against string: numeric when the string is numeric, otherwise the
/// number's rendering is compared to the string.
fn cmp_number_string(n: Number, s: &str) -> Option<Ordering> {
    match parse_numeric(s) {
        Some(parsed) => cmp_numbers(n, parsed),
        None => Some(n.render().as_bytes().cmp(s.as_bytes())),
    }
}

/// Coercing equality (`==`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(x), other) | (other, Value::Boolean(x)) => *x == !other.is_empty(),
        (Value::Null, other) | (other, Value::Null) => other.is_empty(),
        (Value::Instance(x), Value::Instance(y)) => std::ptr::addr_eq(Arc::as_ptr(x), Arc::as_ptr(y)),
        (Value::Instance(_), _) | (_, Value::Instance(_)) => false,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| loose_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, l)| y.get(key).is_some_and(|r| loose_eq(l, r)))
        }
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (Value::String(x), Value::String(y)) => cmp_strings(x, y) == Some(Ordering::Equal),
        (Value::String(s), other) | (other, Value::String(s)) => Number::of(other)
            .and_then(|n| cmp_number_string(n, s))
            .is_some_and(|o| o == Ordering::Equal),
        _ => match (Number::of(a), Number::of(b)) {
            (Some(x), Some(y)) => cmp_numbers(x, y) == Some(Ordering::Equal),
            _ => false,
        },
    }
}

/// Coercing ordering used by the `<`, `<=`, `>`, `>=` criteria.
///
/// Returns `None` when the two values are incomparable (objects, instances,
/// NaN, arrays with incomparable elements).
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Instance(_), _) | (_, Value::Instance(_)) => None,
        (Value::Boolean(_) | Value::Null, _) | (_, Value::Boolean(_) | Value::Null) => {
            Some((!a.is_empty()).cmp(&!b.is_empty()))
        }
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return Some(x.len().cmp(&y.len()));
            }
            for (l, r) in x.iter().zip(y) {
                match compare(l, r)? {
                    Ordering::Equal => continue,
                    unequal => return Some(unequal),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => None,
        (Value::String(x), Value::String(y)) => cmp_strings(x, y),
        (Value::String(s), other) => {
            Number::of(other).and_then(|n| cmp_number_string(n, s)).map(Ordering::reverse)
        }
        (other, Value::String(s)) => Number::of(other).and_then(|n| cmp_number_string(n, s)),
        _ => cmp_numbers(Number::of(a)?, Number::of(b)?),
    }
}

/// The string form of a value as seen by pattern matching.
///
/// Scalars are rendered (`true` → `"1"`, `false` and null → `""`); containers
/// and instances have no string form.
pub fn to_match_string(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Integer(n) => Some(Cow::Owned(n.to_string())),
        Value::Float(n) => Some(Cow::Owned(n.to_string())),
        Value::Boolean(true) => Some(Cow::Borrowed("1")),
        Value::Boolean(false) | Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) | Value::Instance(_) => None,
    }
}

/// Whether a string is numeric in the sense used by loose comparisons.
pub fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}
