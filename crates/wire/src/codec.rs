//! Codec configuration
//!
//! [`Codec`] holds the settings shared by encoding and decoding. The free
//! functions [`crate::encode`] and [`crate::decode`] use `Codec::default()`.

use crate::json::{encode_error, from_json, to_json};
use jsonref_core::{Error, Registry, Result, Value};
use tracing::debug;

/// Reserved key under which tags are written
pub const DEFAULT_TAG_KEY: &str = "$ref";

/// Encoder/decoder settings.
///
/// # Example
///
/// ```
/// use jsonref_wire::Codec;
/// use jsonref_core::{Registry, Value};
///
/// let codec = Codec::builder().tag_key("@ref").pretty(false).build();
/// let text = codec.encode(&Value::Int(1)).unwrap();
/// assert_eq!(codec.decode(&text, &Registry::new()).unwrap(), Value::Int(1));
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    tag_key: String,
    pretty: bool,
}

impl Codec {
    /// Codec with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for codec configuration.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// Reserved key used for tags
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// Whether output is indented
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Encode a value to JSON text.
    ///
    /// Fails only when the value has no JSON representation (non-finite
    /// floats, or a projection that cannot be serialized).
    pub fn encode(&self, value: &Value) -> Result<String> {
        let json = self.to_json(value)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        text.map_err(Error::from)
    }

    /// Encode a value to a JSON tree.
    pub fn to_json(&self, value: &Value) -> Result<serde_json::Value> {
        to_json(value, &self.tag_key)
    }

    /// Decode JSON text, resolving tags through `registry`.
    ///
    /// Malformed text fails with [`Error::Syntax`] before any tag is looked
    /// at. Any resolution failure aborts the whole decode.
    pub fn decode(&self, text: &str, registry: &Registry) -> Result<Value> {
        debug!(len = text.len(), classes = registry.len(), "decoding");
        let json: serde_json::Value = serde_json::from_str(text)?;
        let value = self.from_json(json, registry)?;
        debug!(kind = value.type_name(), "decoded");
        Ok(value)
    }

    /// Decode an already parsed JSON tree.
    pub fn from_json(&self, json: serde_json::Value, registry: &Registry) -> Result<Value> {
        from_json(json, registry, &self.tag_key)
    }

    /// Render an error in the wire error format.
    pub fn encode_error(&self, error: &Error) -> Result<String> {
        encode_error(error, &self.tag_key)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            pretty: false,
        }
    }
}

/// Builder for codec configuration.
///
/// # Example
///
/// ```
/// use jsonref_wire::Codec;
///
/// let codec = Codec::builder()
///     .tag_key("$type")
///     .pretty(true)
///     .build();
/// assert_eq!(codec.tag_key(), "$type");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    inner: Codec,
}

impl CodecBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reserved tag key.
    ///
    /// Plain records must not use this key with a `{"cls": ...}` object
    /// value, or they will be read back as tags.
    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.inner.tag_key = key.into();
        self
    }

    /// Indent encoded output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.inner.pretty = pretty;
        self
    }

    /// Finish configuration.
    pub fn build(self) -> Codec {
        self.inner
    }
}

/// Encode a value with the default codec
pub fn encode(value: &Value) -> Result<String> {
    Codec::default().encode(value)
}

/// Decode JSON text with the default codec
pub fn decode(text: &str, registry: &Registry) -> Result<Value> {
    Codec::default().decode(text, registry)
}
