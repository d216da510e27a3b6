//! Core types for jsonref
//!
//! jsonref is JSON that can carry references to code and types. This crate
//! holds everything except the wire format itself:
//!
//! - [`Value`]: plain JSON data plus classes, instances, functions and tagged
//!   references
//! - [`Tag`]: the record that tells the decoder how to re-derive a reference
//! - [`Class`]: a type descriptor with its explicit table of referrable members
//! - [`Registry`]: name to [`Class`] mapping handed to each decode call
//! - [`mark`]: attaches a tag to a value
//! - [`Error`]: the single error type
//!
//! ## Example
//!
//! ```
//! use jsonref_core::{Class, Instance, Registry, Value};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Point { x: i64, y: i64 }
//!
//! let point = Class::builder::<Point>("Point")
//!     .property("sum", |p: &Point| Value::Int(p.x + p.y))
//!     .build();
//! let registry = Registry::new().with(point.clone());
//!
//! let p = Instance::new(&point, Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(p.get("sum").unwrap(), Value::Int(3));
//! assert!(registry.contains("Point"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod error;
pub mod function;
pub mod mark;
pub mod registry;
pub mod tag;
pub mod value;

pub use class::{Binding, Class, ClassBuilder, Instance};
pub use error::{Error, Result, WireError};
pub use function::Function;
pub use mark::{mark, Origin};
pub use registry::Registry;
pub use tag::Tag;
pub use value::{Ref, Value};
