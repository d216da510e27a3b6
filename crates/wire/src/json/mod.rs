//! JSON wire encoding for jsonref values
//!
//! Plain data is written as ordinary JSON. Every non-plain node becomes a
//! single-key object under the reserved tag key:
//!
//! - `{"$ref": {"cls": "Point"}}` for a type
//! - `{"$ref": {"cls": "Point", "ths": {...}}}` for an instance
//! - `{"$ref": {"cls": "Point", "key": "scale", "ths": {...}}}` for a member
//!   of an instance
//! - `{"$ref": {"cls": "H", "key": "extend", "args": [...]}}` for the result of
//!   calling a static member

mod decode;
mod encode;
mod error;

pub use decode::{from_json, is_tag};
pub use encode::to_json;
pub use error::{encode_error, encode_wire_error};
