//! Value types for jsonref
//!
//! [`Value`] is the in-memory form of everything the protocol can carry. The
//! first seven variants are plain JSON data; the remaining four are the
//! non-plain nodes that the encoder replaces with tags:
//!
//! 1. `Null` - JSON null / absence of value
//! 2. `Bool` - Boolean true or false
//! 3. `Int` - 64-bit signed integer
//! 4. `Float` - 64-bit IEEE-754 floating point
//! 5. `String` - UTF-8 encoded string
//! 6. `Array` - Ordered sequence of values
//! 7. `Object` - String-keyed record, insertion ordered
//! 8. `Class` - Reference to a registered type
//! 9. `Instance` - Instance of a registered type
//! 10. `Function` - Named callable
//! 11. `Ref` - Any value with a tag attached as out-of-band metadata
//!
//! ## Equality Rules
//!
//! - Different types are NEVER equal (no type coercion): `Int(1) != Float(1.0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - `Class` and `Function` compare by identity
//! - `Instance` compares by type name and data
//! - `Ref` is transparent: only the payload takes part in equality

use crate::class::{Class, Instance};
use crate::error::{Error, Result};
use crate::function::Function;
use crate::tag::Tag;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Canonical jsonref value type
#[derive(Clone)]
pub enum Value {
    /// JSON null / absence of value
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    Float(f64),

    /// UTF-8 encoded string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed record of values, insertion ordered
    Object(IndexMap<String, Value>),

    /// Reference to a registered type
    Class(Arc<Class>),

    /// Instance of a registered type
    Instance(Instance),

    /// Named callable
    Function(Function),

    /// Value carrying a tag
    Ref(Box<Ref>),
}

/// Reference marker: a value plus the tag that re-derives it.
///
/// Produced by [`crate::mark`], by referrable members and by the decoder.
/// Never serialized itself; the encoder writes `tag` in its place.
#[derive(Debug, Clone)]
pub struct Ref {
    /// The value being referenced
    pub payload: Value,
    /// How to re-derive `payload` at decode time
    pub tag: Tag,
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Class(_) => "Class",
            Value::Instance(_) => "Instance",
            Value::Function(_) => "Function",
            Value::Ref(_) => "Ref",
        }
    }

    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for scalars, arrays and objects whose children are all plain.
    pub fn is_plain(&self) -> bool {
        match self {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                true
            }
            Value::Array(items) => items.iter().all(Value::is_plain),
            Value::Object(map) => map.values().all(Value::is_plain),
            Value::Class(_) | Value::Instance(_) | Value::Function(_) | Value::Ref(_) => false,
        }
    }

    /// The value with any reference markers peeled off
    pub fn payload(&self) -> &Value {
        let mut current = self;
        while let Value::Ref(r) = current {
            current = &r.payload;
        }
        current
    }

    /// Consume the value, dropping any reference markers
    pub fn into_payload(self) -> Value {
        let mut current = self;
        while let Value::Ref(r) = current {
            current = r.payload;
        }
        current
    }

    /// The attached tag, if this value is a reference marker
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Value::Ref(r) => Some(&r.tag),
            _ => None,
        }
    }

    /// Try to get as bool, looking through markers
    pub fn as_bool(&self) -> Option<bool> {
        match self.payload() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64, looking through markers
    pub fn as_int(&self) -> Option<i64> {
        match self.payload() {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64, looking through markers
    pub fn as_float(&self) -> Option<f64> {
        match self.payload() {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice, looking through markers
    pub fn as_str(&self) -> Option<&str> {
        match self.payload() {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice, looking through markers
    pub fn as_array(&self) -> Option<&[Value]> {
        match self.payload() {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference, looking through markers
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self.payload() {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get as a type reference, looking through markers
    pub fn as_class(&self) -> Option<&Arc<Class>> {
        match self.payload() {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Try to get as an instance, looking through markers
    pub fn as_instance(&self) -> Option<&Instance> {
        match self.payload() {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Try to get as a function, looking through markers
    pub fn as_function(&self) -> Option<&Function> {
        match self.payload() {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Invoke the value if it is (or wraps) a function.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match self.as_function() {
            Some(f) => f.call(args),
            None => Err(Error::WrongType {
                expected: "Function",
                actual: self.payload().type_name(),
            }),
        }
    }

    /// Convert plain data to a `serde_json::Value`.
    ///
    /// Reference markers are dropped in favour of their payload. Fails on
    /// non-plain nodes and on non-finite floats. The tag-aware conversion
    /// lives in the wire crate.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Ref(r) => return r.payload.to_json(),
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| Error::Unrepresentable {
                    reason: format!("non-finite float {}", f),
                })?,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.to_json()?);
                }
                serde_json::Value::Object(out)
            }
            other => {
                return Err(Error::WrongType {
                    expected: "plain data",
                    actual: other.type_name(),
                })
            }
        })
    }
}

/// Plain conversion; tags are not interpreted.
///
/// Integers that fit in i64 become `Int`, all other numbers `Float`.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Arc<Class>> for Value {
    fn from(class: Arc<Class>) -> Self {
        Value::Class(class)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Ref> for Value {
    fn from(r: Ref) -> Self {
        Value::Ref(Box::new(r))
    }
}

// ============================================================================
// Custom PartialEq Implementation (IEEE-754 semantics, no type coercion)
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.payload(), other.payload()) {
            // Same types
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,

            // Different types: NEVER equal (NO TYPE COERCION)
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Object(map) => f.debug_map().entries(map).finish(),
            Value::Class(c) => write!(f, "Class({})", c.name()),
            Value::Instance(i) => fmt::Debug::fmt(i, f),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Ref(r) => write!(f, "Ref({:?} @ {})", r.payload, r.tag),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
