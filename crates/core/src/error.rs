//! Error types for jsonref
//!
//! A single [`Error`] enum covers encoding, decoding and calls into registered
//! members. Every variant maps to a canonical error code and can be rendered
//! into a [`WireError`] for reporting over the wire:
//!
//! ```json
//! {
//!   "code": "UnknownType",
//!   "message": "unknown type: {cls: \"Point\", ths: present}",
//!   "details": {"tag": {"cls": "Point", "ths": {"x": 1}}}
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description |
//! |------|-------------|
//! | SyntaxError | Malformed JSON text |
//! | UnknownType | Tag names a type absent from the registry |
//! | UnknownMember | Type has no referrable member with that name |
//! | NotCallable | Tag carries `args` but the member is not a function |
//! | ConstructFailed | Constructor or factory rejected the payload |
//! | MissingReceiver | Unbound method called without an instance |
//! | WrongType | Value has the wrong shape for the operation |
//! | InvocationFailed | A registered function reported a failure |
//! | Unrepresentable | Value cannot be written as JSON |

use crate::tag::Tag;
use crate::value::Value;
use indexmap::IndexMap;
use thiserror::Error;

/// All jsonref errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON text, reported by the underlying reader
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// Reader message
        message: String,
        /// 1-based line of the failure
        line: usize,
        /// 1-based column of the failure
        column: usize,
    },

    /// A tag names a type that the registry does not contain
    #[error("unknown type: {tag}")]
    UnknownType {
        /// The offending tag, unchanged
        tag: Box<Tag>,
    },

    /// A tag names a member the type does not expose
    #[error("unknown member: {tag}")]
    UnknownMember {
        /// The offending tag, unchanged
        tag: Box<Tag>,
    },

    /// A tag carries arguments for a member that cannot be invoked
    #[error("member is not callable: {tag}")]
    NotCallable {
        /// The offending tag, unchanged
        tag: Box<Tag>,
    },

    /// Constructor or factory rejected the instance payload
    #[error("cannot construct {cls}: {reason}")]
    Construct {
        /// Registered type name
        cls: String,
        /// Why construction failed
        reason: String,
    },

    /// Unbound method invoked without an instance as first argument
    #[error("{function} called without a receiver")]
    MissingReceiver {
        /// Function name
        function: String,
    },

    /// Wrong value type for operation
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected type
        expected: &'static str,
        /// Actual type found
        actual: &'static str,
    },

    /// A registered function failed
    #[error("{function} failed: {reason}")]
    Invocation {
        /// Function name
        function: String,
        /// Failure description
        reason: String,
    },

    /// The value has no JSON representation (e.g. NaN)
    #[error("unrepresentable value: {reason}")]
    Unrepresentable {
        /// What could not be written
        reason: String,
    },
}

/// Result type for jsonref operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Failure raised from inside a registered function.
    pub fn invocation(function: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Invocation {
            function: function.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Syntax { .. } => "SyntaxError",
            Error::UnknownType { .. } => "UnknownType",
            Error::UnknownMember { .. } => "UnknownMember",
            Error::NotCallable { .. } => "NotCallable",
            Error::Construct { .. } => "ConstructFailed",
            Error::MissingReceiver { .. } => "MissingReceiver",
            Error::WrongType { .. } => "WrongType",
            Error::Invocation { .. } => "InvocationFailed",
            Error::Unrepresentable { .. } => "Unrepresentable",
        }
    }

    /// The tag that caused a resolution failure, if any
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Error::UnknownType { tag } | Error::UnknownMember { tag } | Error::NotCallable { tag } => {
                Some(tag)
            }
            _ => None,
        }
    }

    /// Check if this is a registry miss.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Error::UnknownType { .. })
    }

    /// Check if this is a JSON syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        WireError {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get the structured details for this error
    fn details(&self) -> Option<Value> {
        let mut map = IndexMap::new();
        match self {
            Error::Syntax { line, column, .. } => {
                map.insert("line".to_string(), Value::Int(*line as i64));
                map.insert("column".to_string(), Value::Int(*column as i64));
            }
            Error::UnknownType { tag } | Error::UnknownMember { tag } | Error::NotCallable { tag } => {
                map.insert("tag".to_string(), tag.to_value());
            }
            Error::Construct { cls, reason } => {
                map.insert("cls".to_string(), Value::String(cls.clone()));
                map.insert("reason".to_string(), Value::String(reason.clone()));
            }
            Error::MissingReceiver { function } => {
                map.insert("function".to_string(), Value::String(function.clone()));
            }
            Error::WrongType { expected, actual } => {
                map.insert("expected".to_string(), Value::String(expected.to_string()));
                map.insert("actual".to_string(), Value::String(actual.to_string()));
            }
            Error::Invocation { function, reason } => {
                map.insert("function".to_string(), Value::String(function.clone()));
                map.insert("reason".to_string(), Value::String(reason.clone()));
            }
            Error::Unrepresentable { .. } => return None,
        }
        Some(Value::Object(map))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => Error::Syntax {
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
            },
            Category::Data => Error::Unrepresentable {
                reason: e.to_string(),
            },
        }
    }
}

/// Wire error representation for JSON encoding
///
/// This is the canonical wire format for all errors:
/// ```json
/// {
///   "code": "UnknownType",
///   "message": "unknown type: {cls: \"Point\", ths: absent}",
///   "details": {"tag": {"cls": "Point"}}
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WireError {
    /// The canonical error code (e.g., "UnknownType", "SyntaxError")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details as a Value::Object
    pub details: Option<Value>,
}

impl WireError {
    /// Create a new wire error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}
