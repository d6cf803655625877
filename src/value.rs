use std::{collections::HashMap, fmt, sync::Arc};

/// A runtime value that criteria are evaluated against.
///
/// This is the JSON data model with a distinction between integers and floats,
/// extended with [`Value::Instance`] for host objects that expose properties,
/// methods, and a class hierarchy.
///
/// # Equality
///
/// `PartialEq` is *identity* equality: two values are equal only when they have
/// the same variant and the same payload. `Integer(10)`, `Float(10.0)` and
/// `String("10")` are three distinct values. Coercing equality lives in
/// [`crate::coerce::loose_eq`].
///
/// Floats follow IEEE semantics, so `Float(NaN)` is not equal to itself.
/// Structural equivalence of expressions treats NaN payloads as identical.
///
/// # Examples
///
/// ```
/// use clove_criteria::Value;
/// use serde_json::json;
///
/// let doc: Value = json!({"name": "Alice", "age": 35}).into();
/// assert_eq!(doc.type_name(), "object");
///
/// assert_ne!(Value::Integer(10), Value::Float(10.0));
/// assert_eq!(Value::from("10"), Value::String("10".to_string()));
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered list of values
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),

    /// Host object, compared by identity
    Instance(Arc<dyn Instance>),
}

/// A host object that can be inspected by property, method and class criteria.
///
/// Every method except [`class_name`](Instance::class_name) has a default that
/// reports the capability as missing, which makes the corresponding criteria
/// evaluate to `false`.
pub trait Instance: fmt::Debug + Send + Sync {
    /// The concrete class name of this object.
    fn class_name(&self) -> &str;

    /// Whether this object is an instance of `name`.
    ///
    /// Override to report parent classes or implemented interfaces.
    fn is_instance_of(&self, name: &str) -> bool {
        self.class_name() == name
    }

    /// Reads a public property.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Invokes a method and returns its result, or `None` if there is no such method.
    fn call(&self, _method: &str, _args: &[Value]) -> Option<Value> {
        None
    }

    /// The elements of an iterable object.
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }
}

/// Address of an entry inside a keyed container.
///
/// # Examples
/// - `Key::from("name")` → `Name("name")`
/// - `Key::from(0)` → `Index(0)`
/// - `Key::from(-1)` → `Index(-1)` (last element of an array)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Object entry by name
    Name(String),

    /// Array element by position.
    ///
    /// Negative positions count from the end. On objects, the index addresses the
    /// entry whose key is its decimal rendering (`Index(0)` → `"0"`).
    Index(i64),
}

impl Key {
    fn resolve_index(index: i64, len: usize) -> Option<usize> {
        if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).ok()?;
            len.checked_sub(back)
        } else {
            usize::try_from(index).ok()
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{:?}", name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index.into())
    }
}

impl Value {
    /// Returns a human-readable type name.
    ///
    /// Instances report their class name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Instance(instance) => instance.class_name(),
        }
    }

    /// The falsy-emptiness test: null, `false`, numeric zero, and zero-length
    /// strings and collections are empty. Instances never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(b) => !b,
            Value::Integer(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            Value::Instance(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements of an iterable value.
    ///
    /// Returns `None` for scalars and non-iterable instances.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.len()),
            Value::Object(obj) => Some(obj.len()),
            Value::Instance(instance) => instance.elements().map(|items| items.len()),
            _ => None,
        }
    }

    /// Looks up an entry of a keyed container.
    ///
    /// Returns `None` when the key is absent or the value is not keyed.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::Object(map), Key::Name(name)) => map.get(name),
            (Value::Object(map), Key::Index(index)) => map.get(&index.to_string()),
            (Value::Array(arr), Key::Index(index)) => {
                Key::resolve_index(*index, arr.len()).and_then(|i| arr.get(i))
            }
            _ => None,
        }
    }

    /// Whether the value is a keyed container (an array or an object).
    pub fn is_keyed(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// Compact JSON-like rendering with sorted object keys.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => {
                let mut keys: Vec<&String> = obj.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}:{}", key, obj[key])?;
                }
                write!(f, "}}")
            }
            Value::Instance(instance) => write!(f, "<{}>", instance.class_name()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<T: Instance + 'static> From<Arc<T>> for Value {
    fn from(instance: Arc<T>) -> Self {
        Value::Instance(instance)
    }
}
