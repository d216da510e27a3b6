//! JSON decoding for jsonref values
//!
//! Converts a parsed JSON tree into a [`Value`], children before parents, and
//! resolves every tag it meets against the caller's [`Registry`]:
//!
//! | Tag | Result |
//! |-----|--------|
//! | `{cls}` | the registered class |
//! | `{cls, ths}` | instance built by the factory or standard constructor |
//! | `{cls, ths, key}` | member of that instance; functions bound and re-tagged |
//! | `{cls, key}` | static member, carrying its tag |
//! | `{cls, key, args}` | result of calling the static member with `args` |
//!
//! The first failure aborts the whole decode.

use indexmap::IndexMap;
use jsonref_core::{Error, Instance, Ref, Registry, Result, Tag, Value};
use serde_json::Value as Json;
use std::sync::Arc;
use tracing::{trace, warn};

/// Convert a JSON tree to a Value, resolving tags found under `tag_key`
pub fn from_json(json: Json, registry: &Registry, tag_key: &str) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(b)),
        Json::Number(n) => Ok(Value::from(Json::Number(n))),
        Json::String(s) => Ok(Value::String(s)),
        Json::Array(items) => items
            .into_iter()
            .map(|item| from_json(item, registry, tag_key))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Json::Object(map) => {
            let mut obj = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                obj.insert(k, from_json(v, registry, tag_key)?);
            }
            parse_object_or_tag(obj, registry, tag_key)
        }
    }
}

/// Check whether a JSON tree is a tag under `tag_key`
///
/// A tag is an object with exactly one entry, keyed by `tag_key`, whose value
/// is an object with a string `cls`.
pub fn is_tag(json: &Json, tag_key: &str) -> bool {
    match json {
        Json::Object(map) if map.len() == 1 => {
            matches!(map.get(tag_key), Some(Json::Object(record)) if matches!(record.get("cls"), Some(Json::String(_))))
        }
        _ => false,
    }
}

fn parse_object_or_tag(
    mut obj: IndexMap<String, Value>,
    registry: &Registry,
    tag_key: &str,
) -> Result<Value> {
    if obj.len() == 1 {
        if let Some(record) = obj.shift_remove(tag_key) {
            match Tag::try_from(record) {
                Ok(tag) => return resolve(tag, registry),
                // Not a tag record: ordinary data that happens to use the key
                Err(record) => {
                    obj.insert(tag_key.to_string(), record);
                }
            }
        }
    }
    Ok(Value::Object(obj))
}

/// Re-derive the value a tag describes
fn resolve(tag: Tag, registry: &Registry) -> Result<Value> {
    let Some(class) = registry.get(&tag.cls) else {
        warn!(tag = %tag, "tag names a type missing from the registry");
        return Err(Error::UnknownType { tag: Box::new(tag) });
    };
    let class = Arc::clone(class);
    trace!(tag = %tag, "resolving tag");

    match (&tag.ths, &tag.key) {
        (None, None) => Ok(Value::Class(class)),
        (None, Some(key)) => {
            let Some(member) = class.static_member(key).cloned() else {
                return Err(Error::UnknownMember { tag: Box::new(tag) });
            };
            match &tag.args {
                // Keep the reference so the member re-encodes as it arrived
                None if member.tag().is_none() => Ok(Value::from(Ref {
                    payload: member,
                    tag,
                })),
                None => Ok(member),
                Some(args) => match member.as_function() {
                    Some(f) => f.call(args),
                    None => Err(Error::NotCallable { tag: Box::new(tag) }),
                },
            }
        }
        (Some(ths), None) => class.construct(ths).map(Value::Instance),
        (Some(ths), Some(key)) => {
            let instance = class.construct(ths)?;
            match instance.member(key)? {
                Some(member) => Ok(rebind(member, &instance, tag)),
                None => Err(Error::UnknownMember { tag: Box::new(tag) }),
            }
        }
    }
}

/// Functions are bound to `instance` and keep `tag`; other members pass through
fn rebind(member: Value, instance: &Instance, tag: Tag) -> Value {
    match member.into_payload() {
        Value::Function(f) => Value::from(Ref {
            payload: Value::Function(f.bind(instance)),
            tag,
        }),
        other => other,
    }
}
