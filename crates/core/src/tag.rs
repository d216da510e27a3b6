//! Tag records
//!
//! A tag is the only structural extension jsonref makes to JSON. On the wire
//! it appears as a single-key object under the reserved key:
//!
//! ```json
//! {"$ref": {"cls": "Greeter", "key": "greet", "ths": {"name": "Ada"}}}
//! ```
//!
//! | Fields present | Meaning |
//! |----------------|---------|
//! | `cls` | the bare type |
//! | `cls`, `ths` | an instance rebuilt from `ths` |
//! | `cls`, `key` | a static member |
//! | `cls`, `key`, `args` | result of calling a static member with `args` |
//! | `cls`, `key`, `ths` | a member of the rebuilt instance |

use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// Tag record describing how to re-derive a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Registered type name
    pub cls: String,
    /// Member to extract from the type or instance
    pub key: Option<String>,
    /// Serialized constructor payload; presence means "through an instance"
    pub ths: Option<Value>,
    /// Arguments to invoke the extracted member with
    pub args: Option<Vec<Value>>,
}

impl Tag {
    /// Tag for the bare type.
    pub fn type_ref(cls: impl Into<String>) -> Self {
        Tag {
            cls: cls.into(),
            key: None,
            ths: None,
            args: None,
        }
    }

    /// Tag for an instance rebuilt from `ths`.
    pub fn instance(cls: impl Into<String>, ths: Value) -> Self {
        Tag {
            ths: Some(ths),
            ..Tag::type_ref(cls)
        }
    }

    /// Tag for a member of the type.
    pub fn member(cls: impl Into<String>, key: impl Into<String>) -> Self {
        Tag {
            key: Some(key.into()),
            ..Tag::type_ref(cls)
        }
    }

    /// Attach an instance payload.
    pub fn with_ths(mut self, ths: Value) -> Self {
        self.ths = Some(ths);
        self
    }

    /// Attach invocation arguments.
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = Some(args);
        self
    }

    /// True when the tag denotes the bare type.
    pub fn is_type_ref(&self) -> bool {
        self.key.is_none() && self.ths.is_none()
    }

    /// True when the tag denotes a live instance.
    pub fn is_instance_ref(&self) -> bool {
        self.key.is_none() && self.ths.is_some()
    }

    /// Record form of the tag (the value stored under the reserved key).
    pub fn to_value(&self) -> Value {
        let mut map = IndexMap::with_capacity(4);
        map.insert("cls".to_string(), Value::String(self.cls.clone()));
        if let Some(key) = &self.key {
            map.insert("key".to_string(), Value::String(key.clone()));
        }
        if let Some(ths) = &self.ths {
            map.insert("ths".to_string(), ths.clone());
        }
        if let Some(args) = &self.args {
            map.insert("args".to_string(), Value::Array(args.clone()));
        }
        Value::Object(map)
    }
}

/// Parse the record form of a tag.
///
/// The record must be an object with a string `cls`. `key` must be a string
/// and `args` an array when present; `null` counts as absent for both. `ths`
/// counts as present even when it is `null`. Unknown fields are ignored.
/// On mismatch the original value is handed back untouched.
impl TryFrom<Value> for Tag {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !is_record(&value) {
            return Err(value);
        }
        let Value::Object(mut map) = value else {
            return Err(value);
        };

        let Some(Value::String(cls)) = map.shift_remove("cls") else {
            return Err(Value::Object(map));
        };
        let key = match map.shift_remove("key") {
            Some(Value::String(key)) => Some(key),
            _ => None,
        };
        let ths = map.shift_remove("ths");
        let args = match map.shift_remove("args") {
            Some(Value::Array(args)) => Some(args),
            _ => None,
        };

        Ok(Tag {
            cls,
            key,
            ths,
            args,
        })
    }
}

fn is_record(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    let cls_ok = matches!(map.get("cls"), Some(Value::String(_)));
    let key_ok = matches!(map.get("key"), None | Some(Value::Null) | Some(Value::String(_)));
    let args_ok = matches!(map.get("args"), None | Some(Value::Null) | Some(Value::Array(_)));
    cls_ok && key_ok && args_ok
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{cls: {:?}", self.cls)?;
        if let Some(key) = &self.key {
            write!(f, ", key: {:?}", key)?;
        }
        let ths = if self.ths.is_some() { "present" } else { "absent" };
        write!(f, ", ths: {}", ths)?;
        if let Some(args) = &self.args {
            write!(f, ", args: {}", args.len())?;
        }
        write!(f, "}}")
    }
}
