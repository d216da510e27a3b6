//! Reference construction
//!
//! [`mark`] opts a value into referenceability: it attaches the tag that lets
//! the decoder re-derive the value from a registry. Classes use it for their
//! referrable members, and callers can use it directly for anything reachable
//! by name.

use crate::class::{Class, Instance};
use crate::error::Result;
use crate::tag::Tag;
use crate::value::{Ref, Value};
use std::sync::Arc;

/// Where a marked value comes from.
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
    /// A type; produces a static reference
    Class(&'a Arc<Class>),
    /// A live instance; produces an instance reference carrying its payload
    Instance(&'a Instance),
}

impl Origin<'_> {
    /// Registered name of the origin's type
    pub fn class_name(&self) -> &str {
        match self {
            Origin::Class(class) => class.name(),
            Origin::Instance(instance) => instance.class_name(),
        }
    }
}

/// Attach a tag to `value`.
///
/// The tag names the origin's type, `member` as the key, and, for instance
/// origins, the instance's current plain payload as `ths`.
///
/// With `bind` set, an instance origin and a function value, the payload is a
/// fresh function bound to the instance: independently bound references are
/// never equal to each other. Otherwise `value` is kept as is, so marking the
/// same member twice yields equal references. Any tag already on `value` is
/// replaced. `origin` is not modified.
///
/// Fails only if the instance payload cannot be projected.
pub fn mark(origin: Origin<'_>, member: Option<&str>, value: Value, bind: bool) -> Result<Value> {
    let mut tag = Tag::type_ref(origin.class_name());
    tag.key = member.map(str::to_string);

    let payload = value.into_payload();
    let payload = match origin {
        Origin::Class(_) => payload,
        Origin::Instance(instance) => {
            tag.ths = Some(instance.to_plain()?);
            match payload {
                Value::Function(f) if bind => Value::Function(f.bind(instance)),
                other => other,
            }
        }
    };

    Ok(Value::from(Ref { payload, tag }))
}
