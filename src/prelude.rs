//! Convenient imports for jsonref.
//!
//! ```ignore
//! use jsonref::prelude::*;
//!
//! let text = encode(&Value::from(point_class))?;
//! let class = decode(&text, &registry)?;
//! ```

// Entry points
pub use crate::{decode, encode, Codec};

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::{mark, Binding, Class, Function, Instance, Origin, Registry, Tag, Value};
