//! Dynamic value types
//!
//! This module defines the runtime representation of the values all
//! quickdash operations work over: scalars plus the two container shapes
//! (ordered sequences and key-value mappings).

use crate::error::{Error, Result};
use rustc_hash::FxHashMap as HashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Type alias for native function implementations
///
/// A callable takes a call context plus positional arguments. Errors it
/// returns propagate unchanged through the combinators that wrap it.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> Result<Value>>;

/// A dynamic value
#[derive(Clone)]
pub enum Value {
    /// Absent value
    Undefined,
    /// Present-but-nil value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// String
    String(String),
    /// Ordered sequence with index keys 0..n-1
    Sequence(Rc<RefCell<Vec<Value>>>),
    /// Key-value mapping; key order is unspecified
    Mapping(Rc<RefCell<HashMap<String, Value>>>),
    /// Callable
    Function(NativeFn),
}

/// Name of an entry within a container: a sequence index or a mapping key.
///
/// Also serves as the path-segment type for the nested accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Sequence index
    Index(usize),
    /// Mapping key
    Name(String),
}

impl Key {
    /// True for indices and for names that parse as an unsigned integer
    pub fn is_numeric(&self) -> bool {
        match self {
            Key::Index(_) => true,
            Key::Name(name) => name.parse::<usize>().is_ok(),
        }
    }

    /// Numeric view of the key, if it has one
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(idx) => Some(*idx),
            Key::Name(name) => name.parse().ok(),
        }
    }

    /// The key as a value (`Number` for indices, `String` for names)
    pub fn as_value(&self) -> Value {
        match self {
            Key::Index(idx) => Value::Number(*idx as f64),
            Key::Name(name) => Value::String(name.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(idx) => write!(f, "{}", idx),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for Key {
    fn from(idx: usize) -> Self {
        Key::Index(idx)
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

impl Value {
    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is nullish (null or undefined)
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Check if value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Check if value is a mapping
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Check if value is one of the two container shapes
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Check if value is callable
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Short type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Function(_) => "function",
        }
    }

    /// Convert to boolean (truthiness)
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Function(_) => true,
        }
    }

    /// Convert to number
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
            Value::Number(n) => *n,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Sequence(_) | Value::Mapping(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// Strict equality
    ///
    /// Scalars compare by value (NaN is not equal to itself), containers
    /// and functions by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                if a.is_nan() || b.is_nan() {
                    false
                } else {
                    a == b
                }
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => Rc::ptr_eq(a, b),
            (Value::Mapping(a), Value::Mapping(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Structural equality
    ///
    /// Like [`strict_equals`](Value::strict_equals) for scalars, but
    /// containers compare element-wise instead of by identity.
    pub fn deep_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Sequence(a), Value::Sequence(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_equals(y))
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len()
                    && a.iter().all(|(key, val)| {
                        b.get(key).is_some_and(|other_val| val.deep_equals(other_val))
                    })
            }
            _ => self.strict_equals(other),
        }
    }

    /// Relational comparison used for sort keys
    ///
    /// Two strings compare lexicographically; any other pairing compares
    /// after numeric coercion, and NaN comparisons are false.
    pub fn less_than(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a < b,
            _ => {
                let a = self.to_number();
                let b = other.to_number();
                a < b
            }
        }
    }

    /// Create a new sequence value
    pub fn new_sequence(elements: Vec<Value>) -> Value {
        Value::Sequence(Rc::new(RefCell::new(elements)))
    }

    /// Create a new empty mapping value
    pub fn new_mapping() -> Value {
        Value::Mapping(Rc::new(RefCell::new(HashMap::default())))
    }

    /// Create a new mapping value with entries
    pub fn new_mapping_with_entries(entries: HashMap<String, Value>) -> Value {
        Value::Mapping(Rc::new(RefCell::new(entries)))
    }

    /// Create a new function value
    pub fn new_function(func: NativeFn) -> Value {
        Value::Function(func)
    }

    /// Get an entry from a container
    ///
    /// Sequence lookup accepts numeric names as indices; any other access
    /// (missing entry, out-of-range index, non-container receiver) is `None`.
    pub fn get_entry(&self, key: &Key) -> Option<Value> {
        match self {
            Value::Sequence(elements) => {
                let idx = key.as_index()?;
                elements.borrow().get(idx).cloned()
            }
            Value::Mapping(entries) => entries.borrow().get(&key.to_string()).cloned(),
            _ => None,
        }
    }

    /// Set an entry on a container, returning whether the store happened
    ///
    /// Sequence writes past the end pad the gap with `Undefined`. Stores
    /// into non-containers (and non-numeric keys on sequences) are no-ops.
    pub fn set_entry(&self, key: &Key, value: Value) -> bool {
        match self {
            Value::Sequence(elements) => {
                let Some(idx) = key.as_index() else {
                    return false;
                };
                let mut elements = elements.borrow_mut();
                if idx >= elements.len() {
                    elements.resize(idx + 1, Value::Undefined);
                }
                elements[idx] = value;
                true
            }
            Value::Mapping(entries) => {
                entries.borrow_mut().insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    /// Remove an entry from a container
    ///
    /// Mapping keys are deleted; sequence slots are reset to `Undefined`
    /// without shifting later elements.
    pub fn remove_entry(&self, key: &Key) {
        match self {
            Value::Sequence(elements) => {
                if let Some(idx) = key.as_index() {
                    let mut elements = elements.borrow_mut();
                    if idx < elements.len() {
                        elements[idx] = Value::Undefined;
                    }
                }
            }
            Value::Mapping(entries) => {
                entries.borrow_mut().remove(&key.to_string());
            }
            _ => {}
        }
    }

    /// Build a value from JSON
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(elements) => {
                Value::new_sequence(elements.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut mapping = HashMap::default();
                for (key, val) in entries {
                    mapping.insert(key.clone(), Value::from_json(val));
                }
                Value::new_mapping_with_entries(mapping)
            }
        }
    }

    /// Render the value as JSON
    ///
    /// `Undefined` serializes as null; functions are not serializable.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Undefined | Value::Null => Ok(serde_json::Value::Null),
            Value::Boolean(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => {
                // whole numbers keep their integer representation
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    Ok(serde_json::Value::from(*n as i64))
                } else {
                    Ok(serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null))
                }
            }
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Sequence(elements) => {
                let elements = elements.borrow();
                let mut result = Vec::with_capacity(elements.len());
                for el in elements.iter() {
                    result.push(el.to_json()?);
                }
                Ok(serde_json::Value::Array(result))
            }
            Value::Mapping(entries) => {
                let entries = entries.borrow();
                let mut result = serde_json::Map::new();
                for (key, val) in entries.iter() {
                    result.insert(key.clone(), val.to_json()?);
                }
                Ok(serde_json::Value::Object(result))
            }
            Value::Function(_) => Err(Error::type_error("function is not serializable")),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
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
    fn from(elements: Vec<Value>) -> Self {
        Value::new_sequence(elements)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Sequence(elements) => write!(f, "{:?}", elements.borrow()),
            Value::Mapping(entries) => {
                let entries = entries.borrow();
                let mut map = f.debug_map();
                for (key, val) in entries.iter() {
                    map.entry(key, val);
                }
                map.finish()
            }
            Value::Function(_) => write!(f, "[Function]"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else if *n == 0.0 {
                    write!(f, "0")
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(elements) => {
                let elements = elements.borrow();
                let rendered: Vec<String> = elements.iter().map(|el| el.to_string()).collect();
                write!(f, "{}", rendered.join(","))
            }
            Value::Mapping(_) => write!(f, "[object Object]"),
            Value::Function(_) => write!(f, "[Function]"),
        }
    }
}
