//! Wire error encoding for jsonref errors
//!
//! Renders errors in the wire format:
//! ```json
//! {
//!   "code": "UnknownType",
//!   "message": "unknown type: {cls: \"Point\", ths: absent}",
//!   "details": {"tag": {"cls": "Point"}}
//! }
//! ```

use super::encode::to_json;
use jsonref_core::{Error, Result, WireError};
use serde_json::{Map, Value as Json};

/// Encode a WireError to JSON
///
/// Non-plain detail values (e.g. an instance payload inside a tag) are tagged
/// under `tag_key` like any other encoded value.
pub fn encode_wire_error(error: &WireError, tag_key: &str) -> Result<String> {
    let details = match &error.details {
        Some(v) => to_json(v, tag_key)?,
        None => Json::Null,
    };

    let mut out = Map::with_capacity(3);
    out.insert("code".to_string(), Json::String(error.code.clone()));
    out.insert("message".to_string(), Json::String(error.message.clone()));
    out.insert("details".to_string(), details);
    serde_json::to_string(&Json::Object(out)).map_err(Error::from)
}

/// Encode an Error directly to JSON wire format
pub fn encode_error(error: &Error, tag_key: &str) -> Result<String> {
    encode_wire_error(&error.to_wire_error(), tag_key)
}
