use thiserror::Error;

/// Errors raised while constructing a criterion.
///
/// Evaluation never fails: a criterion that cannot be applied to a value simply
/// does not match it. Misuse is rejected up front instead.
#[derive(Debug, Error)]
pub enum ExprError {
    /// The pattern of a `Matches` criterion does not compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A property, method or class name is empty
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    /// A quantifier bound makes the quantifier meaningless
    #[error("{quantity} bound {bound} is out of range")]
    InvalidBound { quantity: &'static str, bound: usize },
}
