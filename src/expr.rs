//! # Criteria Expression Tree
//!
//! This module defines the expression tree: immutable, shareable predicate nodes
//! that are evaluated against a [`Value`](crate::Value), compared for structural
//! equivalence, and rewritten by the [traverser](crate::traverse).
//!
//! ## Architecture Overview
//!
//! - **[node]** - The [`Node`] taxonomy and the [`Expr`] handle
//! - **[constructors]** - Associated functions that build and validate nodes
//! - **[selector]** - Projections into keys, properties and method results
//! - **[quantifier]** - Aggregation over the elements of iterable values
//! - **[membership]** - Accepted-value sets for `In` criteria
//! - **[pattern]** - Compiled regular expressions for `Matches` criteria
//! - **[custom]** - The open seam for leaf kinds defined outside this crate
//! - **[builder]** - Transient builder for conjunctions and disjunctions
//!
//! ## Node Families
//!
//! | Family | Kinds |
//! |---|---|
//! | Comparison | `Same`, `NotSame`, `Equal`, `NotEqual`, `GreaterThan`, `GreaterThanOrEqual`, `LessThan`, `LessThanOrEqual` |
//! | String | `StartsWith`, `EndsWith`, `Contains`, `Matches` |
//! | Membership | `In` |
//! | Shape | `Empty`, `NotEmpty`, `InstanceOf`, `KeyExists`, `KeyNotExists` |
//! | Constant | `AlwaysTrue`, `AlwaysFalse` |
//! | Combinator | `Not`, `And`, `Or` |
//! | Selector | `Select` (key, property, method, custom projection) |
//! | Quantifier | `Quantify` (all, at least one, at least n, at most n, exactly n, count) |
//!
//! ## Sharing
//!
//! [`Expr`] is a reference-counted handle. Cloning it is cheap and never copies
//! the tree, so rewritten trees share every subtree that did not change with the
//! tree they were derived from. [`Expr::ptr_eq`] tells whether two handles point
//! at the same node.
//!
//! ## Examples
//!
//! ```
//! use clove_criteria::{Expr, Value};
//! use serde_json::json;
//!
//! let adult = Expr::key("age", Expr::greater_than_or_equal(18));
//! let named = Expr::key("name", Expr::starts_with("Th"));
//! let expr = adult.and_also(named);
//!
//! let doc: Value = json!({"name": "Thomas", "age": 35}).into();
//! assert!(expr.evaluate(&doc));
//! ```
pub mod builder;
pub mod constructors;
pub mod custom;
pub mod membership;
pub mod node;
pub mod pattern;
pub mod quantifier;
pub mod selector;

pub use builder::{CombinatorBuilder, Junction};
pub use custom::CustomPredicate;
pub use membership::Membership;
pub use node::{Expr, ExprKind, Node};
pub use pattern::Pattern;
pub use quantifier::{Quantifier, Quantity};
pub use selector::{Projection, Projector, Selector};
