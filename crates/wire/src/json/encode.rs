//! JSON encoding for jsonref values
//!
//! Walks a [`Value`] top-down and produces a `serde_json::Value`:
//! - `Ref` nodes write their tag verbatim
//! - functions write their projection, or a type tag named after the function
//! - classes write a type tag
//! - instances write an instance tag with their plain payload
//! - everything else is copied, children recursed

use jsonref_core::{Error, Result, Tag, Value};
use serde_json::{Map, Number, Value as Json};
use tracing::trace;

/// Encode a Value to a JSON tree, tagging non-plain nodes under `tag_key`
pub fn to_json(value: &Value, tag_key: &str) -> Result<Json> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Int(i) => Ok(Json::from(*i)),
        Value::Float(f) => encode_float(*f),
        Value::String(s) => Ok(Json::String(s.clone())),
        Value::Array(items) => encode_array(items, tag_key),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), to_json(v, tag_key)?);
            }
            Ok(Json::Object(out))
        }
        Value::Ref(r) => {
            trace!(tag = %r.tag, "encoding marked reference");
            encode_tag(&r.tag, tag_key)
        }
        Value::Function(f) => match f.projection() {
            Some(projected) => to_json(&projected, tag_key),
            None => {
                trace!(function = f.name(), "encoding function as type reference");
                encode_tag(&Tag::type_ref(f.name()), tag_key)
            }
        },
        Value::Class(class) => encode_tag(&Tag::type_ref(class.name()), tag_key),
        Value::Instance(instance) => {
            trace!(cls = instance.class_name(), "encoding instance");
            let payload = instance.to_plain()?;
            encode_tag(&Tag::instance(instance.class_name(), payload), tag_key)
        }
    }
}

/// Finite floats only; JSON has no NaN or infinity
fn encode_float(f: f64) -> Result<Json> {
    Number::from_f64(f)
        .map(Json::Number)
        .ok_or_else(|| Error::Unrepresentable {
            reason: format!("non-finite float {}", f),
        })
}

fn encode_array(items: &[Value], tag_key: &str) -> Result<Json> {
    items
        .iter()
        .map(|v| to_json(v, tag_key))
        .collect::<Result<Vec<_>>>()
        .map(Json::Array)
}

/// `{tag_key: {cls, key?, ths?, args?}}`; `ths` and `args` are encoded in turn
fn encode_tag(tag: &Tag, tag_key: &str) -> Result<Json> {
    let mut record = Map::with_capacity(4);
    record.insert("cls".to_string(), Json::String(tag.cls.clone()));
    if let Some(key) = &tag.key {
        record.insert("key".to_string(), Json::String(key.clone()));
    }
    if let Some(ths) = &tag.ths {
        record.insert("ths".to_string(), to_json(ths, tag_key)?);
    }
    if let Some(args) = &tag.args {
        record.insert("args".to_string(), encode_array(args, tag_key)?);
    }

    let mut wrapper = Map::with_capacity(1);
    wrapper.insert(tag_key.to_string(), Json::Object(record));
    Ok(Json::Object(wrapper))
}
