//! Callable values
//!
//! A [`Function`] is either a free function over positional arguments or a
//! method that needs an [`Instance`] receiver. Methods can be bound to a
//! receiver with [`Function::bind`]; unbound methods take the receiver as
//! their first argument.
//!
//! Equality is identity: clones of one function compare equal, while every
//! call to `bind` produces a new, distinct function.

use crate::class::Instance;
use crate::error::{Error, Result};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Free function body
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// Method body; receives the instance it runs on
pub type MethodFn = dyn Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync;

/// Custom JSON projection of a callable
pub type ProjectionFn = dyn Fn() -> Value + Send + Sync;

/// Named callable value.
#[derive(Clone)]
pub struct Function {
    inner: Arc<FunctionInner>,
}

struct FunctionInner {
    name: String,
    body: Body,
    projection: Option<Arc<ProjectionFn>>,
}

#[derive(Clone)]
enum Body {
    Native(Arc<NativeFn>),
    Method {
        method: Arc<MethodFn>,
        receiver: Option<Instance>,
    },
}

impl Function {
    /// Create a free function.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::from_body(name.into(), Body::Native(Arc::new(f)), None)
    }

    /// Create an unbound method.
    pub fn method<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::from_body(
            name.into(),
            Body::Method {
                method: Arc::new(f),
                receiver: None,
            },
            None,
        )
    }

    fn from_body(name: String, body: Body, projection: Option<Arc<ProjectionFn>>) -> Self {
        Function {
            inner: Arc::new(FunctionInner {
                name,
                body,
                projection,
            }),
        }
    }

    /// Attach a custom JSON projection.
    ///
    /// The encoder writes the projection's result instead of a type tag.
    /// Returns a new function; the original is unchanged.
    pub fn with_projection<F>(&self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::from_body(
            self.inner.name.clone(),
            self.inner.body.clone(),
            Some(Arc::new(f)),
        )
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// True for a method with a receiver attached
    pub fn is_bound(&self) -> bool {
        self.receiver().is_some()
    }

    /// True for methods, bound or not
    pub fn is_method(&self) -> bool {
        matches!(self.inner.body, Body::Method { .. })
    }

    /// The bound receiver, if any
    pub fn receiver(&self) -> Option<&Instance> {
        match &self.inner.body {
            Body::Method {
                receiver: Some(r), ..
            } => Some(r),
            _ => None,
        }
    }

    /// Custom projection result, if the function has one
    pub fn projection(&self) -> Option<Value> {
        self.inner.projection.as_ref().map(|p| p())
    }

    /// Produce a new function permanently tied to `receiver`.
    ///
    /// Free functions ignore the receiver but still yield a distinct function.
    pub fn bind(&self, receiver: &Instance) -> Function {
        let body = match &self.inner.body {
            Body::Native(f) => Body::Native(Arc::clone(f)),
            Body::Method { method, .. } => Body::Method {
                method: Arc::clone(method),
                receiver: Some(receiver.clone()),
            },
        };
        Self::from_body(self.inner.name.clone(), body, self.inner.projection.clone())
    }

    /// Invoke with positional arguments.
    ///
    /// An unbound method takes its receiver from the first argument.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match &self.inner.body {
            Body::Native(f) => f(args),
            Body::Method {
                method,
                receiver: Some(receiver),
            } => method(receiver, args),
            Body::Method {
                method,
                receiver: None,
            } => match args.split_first() {
                Some((first, rest)) => match first.as_instance() {
                    Some(receiver) => method(receiver, rest),
                    None => Err(self.missing_receiver()),
                },
                None => Err(self.missing_receiver()),
            },
        }
    }

    fn missing_receiver(&self) -> Error {
        Error::MissingReceiver {
            function: self.inner.name.clone(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.receiver() {
            Some(r) => write!(f, "Function({} bound to {})", self.name(), r.class_name()),
            None => write!(f, "Function({})", self.name()),
        }
    }
}
