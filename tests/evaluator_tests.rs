use clove_criteria::{Expr, Instance, PatternConfig, Value};
use serde_json::json;
use std::sync::Arc;

fn doc(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn matches_all(expr: &Expr, values: &[Value]) -> bool {
    values.iter().all(|v| expr.evaluate(v))
}

fn matches_none(expr: &Expr, values: &[Value]) -> bool {
    values.iter().all(|v| !expr.evaluate(v))
}

#[derive(Debug)]
struct User {
    name: String,
    age: i64,
    roles: Vec<String>,
}

impl User {
    fn new(name: &str, age: i64, roles: &[&str]) -> Value {
        Value::from(Arc::new(User {
            name: name.to_string(),
            age,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }))
    }
}

impl Instance for User {
    fn class_name(&self) -> &str {
        "User"
    }

    fn is_instance_of(&self, name: &str) -> bool {
        matches!(name, "User" | "Person")
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "age" => Some(Value::from(self.age)),
            _ => None,
        }
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        match (method, args) {
            ("has_role", [Value::String(role)]) => Some(Value::from(self.roles.contains(role))),
            ("greeting", []) => Some(Value::from(format!("Hello, {}", self.name))),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(self.roles.iter().map(|r| Value::from(r.as_str())).collect())
    }
}

#[derive(Debug)]
struct Opaque;

impl Instance for Opaque {
    fn class_name(&self) -> &str {
        "Opaque"
    }
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_same_is_type_exact() {
    let expr = Expr::same(10);
    assert!(expr.evaluate(&Value::Integer(10)));
    assert!(matches_none(&expr, &[Value::from("10"), Value::Float(10.0), Value::Null]));
}

#[test]
fn test_not_same() {
    let expr = Expr::not_same("10");
    assert!(expr.evaluate(&Value::Integer(10)));
    assert!(!expr.evaluate(&Value::from("10")));
}

#[test]
fn test_equal_coerces() {
    let expr = Expr::equal(10);
    assert!(matches_all(&expr, &[Value::from("10"), Value::Integer(10), Value::Float(10.0), Value::from(" 10 ")]));
    assert!(matches_none(&expr, &[Value::from("10abc"), Value::Integer(11), Value::Null]));
}

#[test]
fn test_equal_null_and_booleans() {
    let falsy = Expr::equal(false);
    assert!(matches_all(&falsy, &[Value::Null, Value::Integer(0), Value::from(""), doc(json!([]))]));
    assert!(!falsy.evaluate(&Value::Integer(1)));

    assert!(Expr::equal(true).evaluate(&Value::from("yes")));
}

#[test]
fn test_not_equal() {
    let expr = Expr::not_equal("10");
    assert!(!expr.evaluate(&Value::Float(10.0)));
    assert!(expr.evaluate(&Value::Integer(9)));
}

#[test]
fn test_equal_containers() {
    let expr = Expr::equal(doc(json!({"a": 1, "b": [1, "2"]})));
    assert!(expr.evaluate(&doc(json!({"b": ["1", 2], "a": "1"}))));
    assert!(!expr.evaluate(&doc(json!({"a": 1}))));
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_ordering_numbers() {
    assert!(Expr::greater_than(0).evaluate(&Value::Integer(1)));
    assert!(!Expr::greater_than(0).evaluate(&Value::Integer(0)));
    assert!(Expr::greater_than_or_equal(0).evaluate(&Value::Integer(0)));
    assert!(Expr::less_than(1.5).evaluate(&Value::Integer(1)));
    assert!(Expr::less_than_or_equal(1).evaluate(&Value::Float(1.0)));
}

#[test]
fn test_ordering_numeric_strings() {
    assert!(Expr::greater_than("9").evaluate(&Value::from("10")));
    assert!(Expr::greater_than(9).evaluate(&Value::from("10")));
    assert!(Expr::less_than("10").evaluate(&Value::Integer(9)));
}

#[test]
fn test_ordering_plain_strings() {
    assert!(Expr::less_than("banana").evaluate(&Value::from("apple")));
    assert!(!Expr::less_than("apple").evaluate(&Value::from("banana")));
}

#[test]
fn test_ordering_large_integers() {
    // 2^53 + 1 is not representable as f64
    let big = 9_007_199_254_740_993_i64;
    assert!(Expr::greater_than(9_007_199_254_740_992.0).evaluate(&Value::Integer(big)));
    assert!(!Expr::greater_than(big).evaluate(&Value::Float(9_007_199_254_740_992.0)));
}

#[test]
fn test_tiny_floats_are_not_zero() {
    let tiny = Value::Float(1e-30);
    assert!(!Expr::equal(0).evaluate(&tiny));
    assert!(Expr::not_equal(0).evaluate(&tiny));
    assert!(Expr::greater_than(0).evaluate(&tiny));
    assert!(Expr::less_than(0).evaluate(&Value::Float(-1e-30)));
    assert!(Expr::not_empty().evaluate(&tiny));
}

#[test]
fn test_ordering_incomparable_fails_closed() {
    let expr = Expr::greater_than(0);
    assert!(matches_none(&expr, &[doc(json!({"a": 1})), User::new("a", 1, &[]), Value::Float(f64::NAN)]));

    let expr = Expr::less_than_or_equal(0);
    assert!(!expr.evaluate(&doc(json!({}))));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_starts_with() {
    let expr = Expr::starts_with("Thomas");
    assert!(expr.evaluate(&Value::from("Thomas Edison")));
    assert!(!expr.evaluate(&Value::from("Mr. Thomas Edison")));
}

#[test]
fn test_ends_with_and_contains() {
    assert!(Expr::ends_with("son").evaluate(&Value::from("Edison")));
    assert!(!Expr::ends_with("Son").evaluate(&Value::from("Edison")));
    assert!(Expr::contains("dis").evaluate(&Value::from("Edison")));
    assert!(Expr::contains("").evaluate(&Value::from("")));
}

#[test]
fn test_string_tests_on_non_strings() {
    let values = [Value::Integer(10), Value::Null, doc(json!(["1"])), User::new("10", 1, &[])];
    assert!(matches_none(&Expr::starts_with("1"), &values));
    assert!(matches_none(&Expr::ends_with("0"), &values));
    assert!(matches_none(&Expr::contains(""), &values));
}

#[test]
fn test_matches_unanchored() {
    let expr = Expr::matches("dis").unwrap();
    assert!(expr.evaluate(&Value::from("Edison")));

    let anchored = Expr::matches("^dis").unwrap();
    assert!(!anchored.evaluate(&Value::from("Edison")));
}

#[test]
fn test_matches_coerces_scalars() {
    let digits = Expr::matches(r"^\d+$").unwrap();
    assert!(digits.evaluate(&Value::Integer(42)));
    assert!(digits.evaluate(&Value::Boolean(true)));
    assert!(!digits.evaluate(&Value::Null));
    assert!(!digits.evaluate(&doc(json!([1]))));
}

#[test]
fn test_matches_with_config() {
    let config = PatternConfig {
        case_insensitive: true,
        ..PatternConfig::default()
    };
    let expr = Expr::matches_with("^edison$", &config).unwrap();
    assert!(expr.evaluate(&Value::from("EDISON")));
    assert!(!Expr::matches("^edison$").unwrap().evaluate(&Value::from("EDISON")));
}

// ============================================================================
// Membership and shape
// ============================================================================

#[test]
fn test_one_of_strict() {
    let expr = Expr::one_of([1, 2, 3]);
    assert!(expr.evaluate(&Value::Integer(2)));
    assert!(!expr.evaluate(&Value::from("2")));
}

#[test]
fn test_one_of_loose() {
    let expr = Expr::one_of_loose([1, 2, 3]);
    assert!(expr.evaluate(&Value::from("2")));
    assert!(expr.evaluate(&Value::Float(3.0)));
    assert!(!expr.evaluate(&Value::Integer(4)));
}

#[test]
fn test_empty_membership_accepts_nothing() {
    let expr = Expr::in_values(Vec::<Value>::new(), false);
    assert!(matches_none(&expr, &[Value::Null, Value::Integer(0), Value::from("")]));
}

#[test]
fn test_empty() {
    let empty = [
        Value::Null,
        Value::Boolean(false),
        Value::Integer(0),
        Value::Float(0.0),
        Value::from(""),
        doc(json!([])),
        doc(json!({})),
    ];
    assert!(matches_all(&Expr::empty(), &empty));
    assert!(matches_none(&Expr::not_empty(), &empty));

    let full = [Value::Boolean(true), Value::Integer(-1), Value::from("0 "), doc(json!([null])), User::new("a", 0, &[])];
    assert!(matches_none(&Expr::empty(), &full));
    assert!(matches_all(&Expr::not_empty(), &full));
}

#[test]
fn test_instance_of() {
    let expr = Expr::instance_of("Person").unwrap();
    assert!(expr.evaluate(&User::new("Ada", 36, &[])));
    assert!(!expr.evaluate(&Value::from(Arc::new(Opaque))));
    assert!(!expr.evaluate(&doc(json!({"class": "Person"}))));

    assert!(Expr::instance_of("Opaque").unwrap().evaluate(&Value::from(Arc::new(Opaque))));
}

#[test]
fn test_key_exists() {
    let object = doc(json!({"name": null, "0": 1}));
    assert!(Expr::key_exists("name").evaluate(&object));
    assert!(Expr::key_exists(0).evaluate(&object));
    assert!(!Expr::key_exists("age").evaluate(&object));

    let array = doc(json!(["a", "b"]));
    assert!(Expr::key_exists(1).evaluate(&array));
    assert!(Expr::key_exists(-2).evaluate(&array));
    assert!(!Expr::key_exists(2).evaluate(&array));
    assert!(!Expr::key_exists(-3).evaluate(&array));
    assert!(!Expr::key_exists("0").evaluate(&array));
}

#[test]
fn test_key_not_exists() {
    let object = doc(json!({"name": "Ada"}));
    assert!(Expr::key_not_exists("age").evaluate(&object));
    assert!(!Expr::key_not_exists("name").evaluate(&object));
}

#[test]
fn test_key_tests_on_non_keyed_values() {
    let values = [Value::from("name"), Value::Null, User::new("Ada", 36, &[])];
    assert!(matches_none(&Expr::key_exists("name"), &values));
    assert!(matches_none(&Expr::key_not_exists("name"), &values));
}

#[test]
fn test_constants() {
    let values = [Value::Null, Value::Integer(1), doc(json!({"a": []}))];
    assert!(matches_all(&Expr::always_true(), &values));
    assert!(matches_none(&Expr::always_false(), &values));
}

// ============================================================================
// Combinators
// ============================================================================

#[test]
fn test_not_negates() {
    let exprs = [
        Expr::greater_than(0),
        Expr::starts_with("a"),
        Expr::key_exists("a"),
        Expr::all(Expr::same(1)),
        Expr::always_false(),
    ];
    let values = [Value::Integer(1), Value::from("abc"), doc(json!({"a": 1})), doc(json!([1, 1])), Value::Null];
    for expr in &exprs {
        for value in &values {
            assert_eq!(Expr::not(expr.clone()).evaluate(value), !expr.evaluate(value));
            assert_eq!((!expr.clone()).evaluate(value), !expr.evaluate(value));
        }
    }
}

#[test]
fn test_empty_combinators() {
    let values = [Value::Null, Value::Integer(1), doc(json!([]))];
    assert!(matches_all(&Expr::and([]), &values));
    assert!(matches_none(&Expr::or([]), &values));
}

#[test]
fn test_and_or() {
    let range = Expr::greater_than(0).and_also(Expr::less_than(10));
    assert!(range.evaluate(&Value::Integer(5)));
    assert!(!range.evaluate(&Value::Integer(10)));

    let outside = Expr::less_than(0).or_else(Expr::greater_than(10));
    assert!(outside.evaluate(&Value::Integer(-1)));
    assert!(!outside.evaluate(&Value::Integer(5)));
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_key_selector() {
    let expr = Expr::key("age", Expr::greater_than(0));
    assert!(expr.evaluate(&doc(json!({"age": 35}))));
    assert!(!expr.evaluate(&doc(json!({"age": -1}))));
    assert!(!expr.evaluate(&doc(json!({}))));
    assert!(!expr.evaluate(&Value::Integer(35)));
}

#[test]
fn test_key_selector_missing_key_under_not() {
    // the selector fails closed, so its negation matches
    let expr = Expr::not(Expr::key("age", Expr::greater_than(0)));
    assert!(expr.evaluate(&doc(json!({}))));
}

#[test]
fn test_nested_key_selectors() {
    let expr = Expr::key("user", Expr::key("tags", Expr::key(-1, Expr::same("admin"))));
    assert!(expr.evaluate(&doc(json!({"user": {"tags": ["dev", "admin"]}}))));
    assert!(!expr.evaluate(&doc(json!({"user": {"tags": []}}))));
}

#[test]
fn test_key_selector_negative_index() {
    let items = doc(json!([1, 2, 3]));
    assert!(Expr::key(-1, Expr::same(3)).evaluate(&items));
    assert!(Expr::key(-3, Expr::same(1)).evaluate(&items));
    assert!(!Expr::key(-4, Expr::always_true()).evaluate(&items));
    assert!(!Expr::key(3, Expr::always_true()).evaluate(&items));
}

#[test]
fn test_key_selector_index_on_object() {
    let object = doc(json!({"0": "zero", "-1": "minus one"}));
    assert!(Expr::key(0, Expr::same("zero")).evaluate(&object));
    assert!(Expr::key(-1, Expr::same("minus one")).evaluate(&object));
    assert!(!Expr::key(1, Expr::always_true()).evaluate(&object));
}

#[test]
fn test_key_exists_on_empty_array() {
    let empty = doc(json!([]));
    assert!(!Expr::key_exists(-1).evaluate(&empty));
    assert!(!Expr::key_exists(0).evaluate(&empty));
    assert!(Expr::key_not_exists(-1).evaluate(&empty));
}

#[test]
fn test_key_exists_with_extreme_indices() {
    let items = doc(json!([1]));
    assert!(!Expr::key_exists(i64::MIN).evaluate(&items));
    assert!(!Expr::key_exists(i64::MAX).evaluate(&items));
}

#[test]
fn test_key_selector_null_entry() {
    let expr = Expr::key("name", Expr::empty());
    assert!(expr.evaluate(&doc(json!({"name": null}))));
    assert!(!expr.evaluate(&doc(json!({}))));
}

#[test]
fn test_property_selector() {
    let expr = Expr::property("age", Expr::greater_than_or_equal(18)).unwrap();
    assert!(expr.evaluate(&User::new("Ada", 36, &[])));
    assert!(!expr.evaluate(&User::new("Tim", 12, &[])));
    assert!(!expr.evaluate(&doc(json!({"age": 36}))));

    let missing = Expr::property("email", Expr::always_true()).unwrap();
    assert!(!missing.evaluate(&User::new("Ada", 36, &[])));
}

#[test]
fn test_method_selector() {
    let admin = Expr::method("has_role", vec![Value::from("admin")], Expr::same(true)).unwrap();
    assert!(admin.evaluate(&User::new("Ada", 36, &["admin"])));
    assert!(!admin.evaluate(&User::new("Tim", 12, &["dev"])));

    let greeting = Expr::method("greeting", vec![], Expr::ends_with("Ada")).unwrap();
    assert!(greeting.evaluate(&User::new("Ada", 36, &[])));

    let unknown = Expr::method("delete", vec![], Expr::always_true()).unwrap();
    assert!(!unknown.evaluate(&User::new("Ada", 36, &[])));
    assert!(!unknown.evaluate(&Value::from(Arc::new(Opaque))));
}

// ============================================================================
// Quantifiers
// ============================================================================

#[test]
fn test_exactly() {
    let expr = Expr::exactly(2, Expr::greater_than(10));
    assert!(expr.evaluate(&doc(json!([9, 11, 12]))));
    assert!(!expr.evaluate(&doc(json!([9, 11, 12, 13]))));
    assert!(!expr.evaluate(&doc(json!([]))));
}

#[test]
fn test_exactly_zero() {
    let expr = Expr::exactly(0, Expr::greater_than(10));
    assert!(expr.evaluate(&doc(json!([]))));
    assert!(expr.evaluate(&doc(json!([1, 2]))));
    assert!(!expr.evaluate(&doc(json!([11]))));
}

#[test]
fn test_all() {
    let expr = Expr::all(Expr::greater_than(0));
    assert!(expr.evaluate(&doc(json!([1, 2, 3]))));
    assert!(!expr.evaluate(&doc(json!([1, 0, 3]))));
    assert!(expr.evaluate(&doc(json!([]))));
    assert!(expr.evaluate(&doc(json!({"a": 1, "b": 2}))));
}

#[test]
fn test_at_least_one() {
    let expr = Expr::at_least_one(Expr::same("admin"));
    assert!(expr.evaluate(&doc(json!(["dev", "admin"]))));
    assert!(!expr.evaluate(&doc(json!(["dev"]))));
    assert!(!expr.evaluate(&doc(json!([]))));
}

#[test]
fn test_at_least() {
    let expr = Expr::at_least(2, Expr::equal(1)).unwrap();
    assert!(expr.evaluate(&doc(json!([1, "1", 2]))));
    assert!(!expr.evaluate(&doc(json!([1, 2, 3]))));
}

#[test]
fn test_at_most() {
    let expr = Expr::at_most(1, Expr::empty());
    assert!(expr.evaluate(&doc(json!([]))));
    assert!(expr.evaluate(&doc(json!([0, 1]))));
    assert!(!expr.evaluate(&doc(json!([0, null, 1]))));

    let none = Expr::at_most(0, Expr::empty());
    assert!(none.evaluate(&doc(json!([1, 2]))));
    assert!(!none.evaluate(&doc(json!([1, ""]))));
}

#[test]
fn test_count() {
    let expr = Expr::count(Expr::greater_than_or_equal(2));
    assert!(expr.evaluate(&doc(json!([1, 2]))));
    assert!(expr.evaluate(&doc(json!({"a": 1, "b": 2, "c": 3}))));
    assert!(!expr.evaluate(&doc(json!([1]))));
    assert!(!expr.evaluate(&Value::from("abc")));

    assert!(Expr::count(Expr::same(0)).evaluate(&doc(json!([]))));
}

#[test]
fn test_quantifiers_over_non_iterables() {
    let values = [Value::Integer(1), Value::from("abc"), Value::Null, Value::from(Arc::new(Opaque))];
    assert!(matches_none(&Expr::all(Expr::always_true()), &values));
    assert!(matches_none(&Expr::at_least_one(Expr::always_true()), &values));
    assert!(matches_none(&Expr::at_most(5, Expr::always_true()), &values));
    assert!(matches_none(&Expr::exactly(0, Expr::always_true()), &values));
    assert!(matches_none(&Expr::count(Expr::always_true()), &values));
}

#[test]
fn test_quantifiers_over_instances() {
    let user = User::new("Ada", 36, &["dev", "admin"]);
    assert!(Expr::at_least_one(Expr::same("admin")).evaluate(&user));
    assert!(Expr::count(Expr::same(2)).evaluate(&user));
    assert!(!Expr::all(Expr::same("dev")).evaluate(&user));
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_filtering_documents() {
    let people = [
        doc(json!({"name": "Ada", "age": 36, "tags": ["math", "code"]})),
        doc(json!({"name": "Tim", "age": "17", "tags": []})),
        doc(json!({"name": "Grace", "age": 45.5, "tags": ["code", "navy"]})),
        doc(json!({"name": "Linus"})),
    ];
    let expr = Expr::and([
        Expr::key("age", Expr::greater_than_or_equal(18)),
        Expr::key("tags", Expr::at_least_one(Expr::same("code"))),
        Expr::not(Expr::key("name", Expr::matches("^G").unwrap())),
    ]);

    let names: Vec<String> = people
        .iter()
        .filter(|p| expr.evaluate(p))
        .filter_map(|p| p.get(&"name".into()).map(|n| n.to_string()))
        .collect();
    assert_eq!(names, vec!["\"Ada\"".to_string()]);
}

#[test]
fn test_shared_subtrees_evaluate_independently() {
    let positive = Expr::greater_than(0);
    let expr = Expr::and([
        Expr::key("a", positive.clone()),
        Expr::key("b", positive.clone()),
    ]);
    assert!(expr.evaluate(&doc(json!({"a": 1, "b": 2}))));
    assert!(!expr.evaluate(&doc(json!({"a": 1, "b": -2}))));
    assert!(positive.evaluate(&Value::Integer(1)));
}
