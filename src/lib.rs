//! # jsonref
//!
//! JSON that can carry references to code and types.
//!
//! Plain data stays plain JSON. Classes, instances, static members and
//! instance methods are written as tags naming a registered type, and are
//! re-derived at decode time from a [`Registry`] the caller supplies.
//!
//! ## Quick Start
//!
//! ```
//! use jsonref::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Greeter { name: String }
//!
//! let greeter = Class::builder::<Greeter>("Greeter")
//!     .referrable_method("greet", Binding::Bound, |g: &Greeter, _: &[Value]| {
//!         Ok(Value::from(format!("hello from {}", g.name)))
//!     })
//!     .build();
//! let registry = Registry::new().with(greeter.clone());
//!
//! let ada = Instance::new(&greeter, Greeter { name: "Ada".into() })?;
//! let greet = ada.get("greet")?;
//!
//! let text = encode(&greet)?;
//! assert_eq!(text, r#"{"$ref":{"cls":"Greeter","key":"greet","ths":{"name":"Ada"}}}"#);
//!
//! let decoded = decode(&text, &registry)?;
//! assert_eq!(decoded.call(&[])?, Value::from("hello from Ada"));
//! # Ok::<(), jsonref::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`jsonref_core`]: values, tags, classes, registry, [`mark`]
//! - [`jsonref_wire`]: the encoder, the decoder and [`Codec`] settings

#![warn(missing_docs)]

pub mod prelude;

// Re-export main entry points
pub use jsonref_wire::{decode, encode, Codec, CodecBuilder, DEFAULT_TAG_KEY};

// Error handling
pub use jsonref_core::{Error, Result, WireError};

// Core types
pub use jsonref_core::{
    mark, Binding, Class, ClassBuilder, Function, Instance, Origin, Ref, Registry, Tag, Value,
};

pub use jsonref_core;
pub use jsonref_wire;
