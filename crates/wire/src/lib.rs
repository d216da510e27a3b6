//! Wire encoding for jsonref
//!
//! This crate turns [`Value`]s into JSON text and back. Plain data is written
//! as ordinary JSON; classes, instances, functions and marked references are
//! written as tags under a reserved key (`"$ref"` by default):
//!
//! | Value | JSON Encoding |
//! |-------|--------------|
//! | Null / Bool / Int / Float / String | as JSON |
//! | Array / Object | `[...]` / `{...}`, insertion order |
//! | Class | `{"$ref": {"cls": name}}` |
//! | Instance | `{"$ref": {"cls": name, "ths": payload}}` |
//! | Function | its projection, or `{"$ref": {"cls": function name}}` |
//! | Ref | `{"$ref": tag}` |
//!
//! ## Examples
//!
//! ```
//! use jsonref_wire::{encode, decode};
//! use jsonref_core::{Registry, Value};
//!
//! let value = Value::Int(42);
//! let json = encode(&value).unwrap();
//! assert_eq!(json, "42");
//!
//! let decoded = decode("42", &Registry::new()).unwrap();
//! assert_eq!(decoded, Value::Int(42));
//! ```
//!
//! Cyclic graphs are not detected: an instance whose projection contains
//! itself recurses until the stack is exhausted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod json;

pub use codec::{decode, encode, Codec, CodecBuilder, DEFAULT_TAG_KEY};
pub use json::{encode_error, encode_wire_error, from_json, is_tag, to_json};

// Re-exported so callers can name the value types without a second import
pub use jsonref_core::{Error, Registry, Result, Value};
