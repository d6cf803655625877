//! Composable predicate trees over dynamic values.
//!
//! A criterion is an immutable [`Expr`] tree built from comparisons, string
//! tests, membership, shape tests, boolean combinators, selectors and
//! quantifiers. Trees can be:
//!
//! - evaluated against a [`Value`] ([`Expr::evaluate`]),
//! - compared for structural equivalence ([`Expr::equivalent_to`]),
//! - rewritten by [`Visitor`]s ([`traverse()`]).
//!
//! ```
//! use clove_criteria::{Expr, Value};
//! use serde_json::json;
//!
//! let expr = Expr::key("tags", Expr::at_least_one(Expr::equal("rust")));
//! let doc: Value = json!({"tags": ["go", "rust"]}).into();
//! assert!(expr.evaluate(&doc));
//! ```

pub mod coerce;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod traverse;
pub mod value;

pub use config::PatternConfig;
pub use error::ExprError;
pub use expr::{
    CombinatorBuilder, CustomPredicate, Expr, ExprKind, Junction, Membership, Node, Pattern,
    Projection, Projector, Quantifier, Quantity, Selector,
};
pub use traverse::{FnVisitor, Visitor, traverse};
pub use value::{Instance, Key, Value};
